//! Core logger types and traits

pub mod error;
pub mod global;
pub mod logger;
pub mod message;
pub mod metrics;
pub mod severity;
pub mod sink;

pub use error::{LoggerError, Result};
pub use global::global;
pub use logger::{Logger, LoggerBuilder};
pub use message::{concat_fragments, Message};
pub use metrics::LoggerMetrics;
pub use severity::Severity;
pub use sink::Sink;
