//! Process-wide default logger

use super::logger::Logger;
use once_cell::sync::Lazy;

static DEFAULT_LOGGER: Lazy<Logger> = Lazy::new(Logger::new);

/// The shared logger for call sites that do not carry their own.
///
/// Created on first access with no sinks and the default threshold, and kept
/// until the process exits. Register sinks once at startup:
///
/// ```
/// use sinklog::prelude::*;
///
/// sinklog::global().add_sink(ConsoleSink::new());
/// sinklog::global().info("main", &[&"started"]);
/// ```
///
/// Prefer passing a [`Logger`] explicitly where that is practical; tests in
/// particular should build their own instead of sharing this one.
pub fn global() -> &'static Logger {
    &DEFAULT_LOGGER
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_single_instance() {
        let first = global() as *const Logger;
        let second = Logger::global() as *const Logger;
        assert_eq!(first, second);
    }
}
