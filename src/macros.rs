//! Variadic logging macros.
//!
//! Each fragment after the tag may be any `Display` value; fragments are
//! concatenated with no separator, so strings and numbers mix freely.
//!
//! # Examples
//!
//! ```
//! use sinklog::prelude::*;
//! use sinklog::info;
//!
//! let logger = Logger::new();
//!
//! info!(logger, "net", "Server started");
//!
//! let port = 8080;
//! info!(logger, "net", "Listening on port ", port);
//!
//! info!(logger, "math", "int: ", 42, ", double: ", 3.14);
//! ```

/// Concatenate fragments into a `String`.
///
/// ```
/// let text = sinklog::fragments!("retry ", 2, "/", 5);
/// assert_eq!(text, "retry 2/5");
/// ```
#[macro_export]
macro_rules! fragments {
    ($($fragment:expr),* $(,)?) => {
        $crate::core::message::concat_fragments(
            &[$(&$fragment as &dyn ::std::fmt::Display),*]
        )
    };
}

/// Log fragments at an explicit severity.
///
/// ```
/// # use sinklog::prelude::*;
/// # let logger = Logger::new();
/// use sinklog::log;
/// log!(logger, Severity::Info, "tag", "Simple message");
/// log!(logger, Severity::Error, "tag", "Error code: ", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $logger.log($level, $tag, &[$(&$fragment as &dyn ::std::fmt::Display),*])
    };
}

/// Log an emergency-level message.
#[macro_export]
macro_rules! emergency {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Emergency, $tag $(, $fragment)*)
    };
}

/// Log an alert-level message.
#[macro_export]
macro_rules! alert {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Alert, $tag $(, $fragment)*)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Critical, $tag $(, $fragment)*)
    };
}

/// Log an error-level message.
///
/// ```
/// # use sinklog::prelude::*;
/// # let logger = Logger::new();
/// use sinklog::error;
/// error!(logger, "db", "Failed to connect to ", "primary");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Error, $tag $(, $fragment)*)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Warning, $tag $(, $fragment)*)
    };
}

/// Log a notice-level message.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Notice, $tag $(, $fragment)*)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Info, $tag $(, $fragment)*)
    };
}

/// Log a debug-level message.
///
/// ```
/// # use sinklog::prelude::*;
/// # let logger = Logger::new();
/// # logger.set_threshold(Severity::Debug);
/// use sinklog::debug;
/// debug!(logger, "cache", "Counter value: ", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $tag:expr $(, $fragment:expr)* $(,)?) => {
        $crate::log!($logger, $crate::Severity::Debug, $tag $(, $fragment)*)
    };
}
