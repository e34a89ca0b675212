//! # sinklog
//!
//! A small severity-leveled logging facade that fans messages out to
//! pluggable sinks.
//!
//! ## Features
//!
//! - **Eight ordered severities**: Debug through Emergency, filtered by a
//!   per-logger threshold
//! - **Pluggable sinks**: console, system log, or any type implementing [`Sink`]
//! - **Best-effort delivery**: a failing sink never fails the caller or the
//!   sinks after it
//! - **Thread safe**: every logger method takes `&self`
//!
//! ```
//! use sinklog::prelude::*;
//!
//! let logger = Logger::new();
//! logger.add_sink(ConsoleSink::new());
//! logger.set_threshold(Severity::Error);
//!
//! logger.warning("tag", &[&"x"]); // suppressed
//! logger.critical("tag", &[&"y"]); // one line on stdout
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        concat_fragments, global, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Message,
        Result, Severity, Sink,
    };
    pub use crate::sinks::ConsoleSink;
    #[cfg(unix)]
    pub use crate::sinks::{SyslogFacility, SyslogOptions, SyslogSink};
}

pub use crate::core::{
    concat_fragments, global, Logger, LoggerBuilder, LoggerError, LoggerMetrics, Message, Result,
    Severity, Sink,
};
pub use sinks::ConsoleSink;
#[cfg(unix)]
pub use sinks::{SyslogFacility, SyslogOptions, SyslogSink};
