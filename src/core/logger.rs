//! Main logger implementation

use super::{
    error::Result,
    message::{concat_fragments, panic_message, Message},
    metrics::LoggerMetrics,
    severity::Severity,
    sink::Sink,
};
use parking_lot::{Mutex, RwLock};
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

/// Composite logger: filters by threshold, then broadcasts to its sinks.
///
/// Sinks are owned by the logger and receive messages in registration
/// order. The sink list is locked for the whole broadcast, so messages from
/// concurrent callers are never interleaved within one call. A sink must not
/// log through the logger that owns it.
pub struct Logger {
    threshold: RwLock<Severity>,
    sinks: Mutex<Vec<Box<dyn Sink>>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            threshold: RwLock::new(Severity::default()),
            sinks: Mutex::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use sinklog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .threshold(Severity::Warning)
    ///     .sink(ConsoleSink::new())
    ///     .build();
    /// assert_eq!(logger.sink_count(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The process-wide default logger, see [`crate::global`].
    pub fn global() -> &'static Logger {
        super::global::global()
    }

    pub fn set_threshold(&self, level: Severity) {
        *self.threshold.write() = level;
    }

    pub fn threshold(&self) -> Severity {
        *self.threshold.read()
    }

    /// Whether a message at `severity` would reach the sinks right now.
    #[inline]
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.threshold()
    }

    pub fn add_sink<S: Sink + 'static>(&self, sink: S) {
        self.add_boxed_sink(Box::new(sink));
    }

    pub fn add_boxed_sink(&self, sink: Box<dyn Sink>) {
        self.sinks.lock().push(sink);
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    /// Names of the registered sinks, in delivery order.
    pub fn sink_names(&self) -> Vec<String> {
        self.sinks.lock().iter().map(|s| s.name().to_string()).collect()
    }

    /// Log a message built from `fragments`.
    ///
    /// Fragments are only rendered once the threshold check has passed.
    pub fn log(&self, severity: Severity, tag: &str, fragments: &[&dyn Display]) {
        if !self.is_enabled(severity) {
            self.metrics.record_suppressed();
            return;
        }

        let text = concat_fragments(fragments);
        self.broadcast(severity, tag, &text);
    }

    /// Log an already materialized message.
    pub fn dispatch(&self, message: &Message) {
        if !self.is_enabled(message.severity) {
            self.metrics.record_suppressed();
            return;
        }

        self.broadcast(message.severity, &message.tag, &message.text);
    }

    /// Deliver to every sink in order with per-sink failure isolation.
    ///
    /// An error or panic in one sink is reported on stderr and the next
    /// sink still receives the message.
    fn broadcast(&self, severity: Severity, tag: &str, text: &str) {
        let mut sinks = self.sinks.lock();
        let mut has_error = false;

        for (idx, sink) in sinks.iter_mut().enumerate() {
            let emit_result =
                panic::catch_unwind(AssertUnwindSafe(|| sink.emit(severity, tag, text)));

            match emit_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[SINKLOG ERROR] Sink #{} ({}) failed: {}",
                        idx,
                        sink.name(),
                        e
                    );
                    self.metrics.record_sink_failure();
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[SINKLOG CRITICAL] Sink #{} ({}) panicked: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        panic_message(&*panic_info)
                    );
                    self.metrics.record_sink_failure();
                    has_error = true;
                }
            }
        }

        self.metrics.record_delivered();
        if has_error {
            self.metrics.record_failed_delivery();
        }
    }

    /// Flush every sink, returning the first error after trying them all.
    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        let mut first_error = None;
        for sink in sinks.iter_mut() {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    #[inline]
    pub fn emergency(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Emergency, tag, fragments);
    }

    #[inline]
    pub fn alert(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Alert, tag, fragments);
    }

    #[inline]
    pub fn critical(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Critical, tag, fragments);
    }

    #[inline]
    pub fn error(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Error, tag, fragments);
    }

    #[inline]
    pub fn warning(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Warning, tag, fragments);
    }

    #[inline]
    pub fn notice(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Notice, tag, fragments);
    }

    #[inline]
    pub fn info(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Info, tag, fragments);
    }

    #[inline]
    pub fn debug(&self, tag: &str, fragments: &[&dyn Display]) {
        self.log(Severity::Debug, tag, fragments);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        for sink in self.sinks.get_mut().iter_mut() {
            if let Err(e) = sink.flush() {
                eprintln!(
                    "[SINKLOG ERROR] Failed to flush sink ({}) during shutdown: {}",
                    sink.name(),
                    e
                );
            }
        }
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use sinklog::prelude::*;
///
/// let logger = Logger::builder()
///     .threshold(Severity::Debug)
///     .sink(ConsoleSink::new())
///     .sink(ConsoleSink::new())
///     .build();
/// assert_eq!(logger.threshold(), Severity::Debug);
/// ```
pub struct LoggerBuilder {
    threshold: Severity,
    sinks: Vec<Box<dyn Sink>>,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            threshold: Severity::default(),
            sinks: Vec::new(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: Severity) -> Self {
        self.threshold = level;
        self
    }

    /// Append a sink; sinks are delivered to in the order they are added
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn boxed_sink(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    pub fn build(self) -> Logger {
        let logger = Logger::new();
        logger.set_threshold(self.threshold);
        for sink in self.sinks {
            logger.add_boxed_sink(sink);
        }
        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;
    use std::sync::Arc;

    type Record = (String, Severity, String, String);

    struct RecordingSink {
        name: String,
        records: Arc<Mutex<Vec<Record>>>,
    }

    impl Sink for RecordingSink {
        fn emit(&mut self, severity: Severity, tag: &str, text: &str) -> Result<()> {
            self.records
                .lock()
                .push((self.name.clone(), severity, tag.to_string(), text.to_string()));
            Ok(())
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn emit(&mut self, _severity: Severity, _tag: &str, _text: &str) -> Result<()> {
            Err(LoggerError::other("Simulated failure"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn emit(&mut self, _severity: Severity, _tag: &str, _text: &str) -> Result<()> {
            panic!("sink exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    fn recording(name: &str, records: &Arc<Mutex<Vec<Record>>>) -> RecordingSink {
        RecordingSink {
            name: name.to_string(),
            records: Arc::clone(records),
        }
    }

    #[test]
    fn test_default_threshold_is_info() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_sink(recording("s1", &records));

        logger.debug("tag", &[&"hidden"]);
        logger.info("tag", &[&"shown"]);

        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, Severity::Info);
        assert_eq!(records[0].3, "shown");
    }

    #[test]
    fn test_threshold_filters() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_sink(recording("s1", &records));
        logger.add_sink(recording("s2", &records));
        logger.set_threshold(Severity::Warning);

        logger.info("tag", &[&"x"]);
        assert!(records.lock().is_empty());

        logger.error("tag", &[&"y"]);
        assert_eq!(records.lock().len(), 2);
        assert_eq!(logger.metrics().suppressed(), 1);
        assert_eq!(logger.metrics().delivered(), 1);
    }

    #[test]
    fn test_broadcast_order() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        for name in ["s1", "s2", "s3"] {
            logger.add_sink(recording(name, &records));
        }

        logger.notice("net", &[&"up ", &3]);

        let records = records.lock();
        let names: Vec<&str> = records.iter().map(|r| r.0.as_str()).collect();
        assert_eq!(names, ["s1", "s2", "s3"]);
        for record in records.iter() {
            assert_eq!(record.1, Severity::Notice);
            assert_eq!(record.2, "net");
            assert_eq!(record.3, "up 3");
        }
    }

    #[test]
    fn test_threshold_change_applies_to_next_call() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_sink(recording("s1", &records));

        logger.info("tag", &[&"first"]);
        logger.set_threshold(Severity::Critical);
        logger.info("tag", &[&"second"]);
        logger.set_threshold(Severity::Debug);
        logger.debug("tag", &[&"third"]);

        let texts: Vec<String> = records.lock().iter().map(|r| r.3.clone()).collect();
        assert_eq!(texts, ["first", "third"]);
    }

    #[test]
    fn test_no_sinks_is_noop() {
        let logger = Logger::new();
        logger.emergency("tag", &[&"nobody listens"]);
        assert_eq!(logger.sink_count(), 0);
        assert_eq!(logger.metrics().delivered(), 1);
        assert!(logger.flush().is_ok());
    }

    #[test]
    fn test_failing_sink_does_not_block_others() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_sink(FailingSink);
        logger.add_sink(PanickingSink);
        logger.add_sink(recording("after", &records));

        for _ in 0..3 {
            logger.error("tag", &[&"still delivered"]);
        }

        assert_eq!(records.lock().len(), 3);
        assert_eq!(logger.metrics().sink_failures(), 6);
        assert_eq!(logger.metrics().failed_deliveries(), 3);
    }

    #[test]
    fn test_dispatch_message() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::new();
        logger.add_sink(recording("s1", &records));

        logger.dispatch(&Message::new(Severity::Debug, "tag", "dropped"));
        logger.dispatch(&Message::new(Severity::Alert, "tag", "kept"));

        let records = records.lock();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1, Severity::Alert);
    }

    #[test]
    fn test_builder() {
        let records = Arc::new(Mutex::new(Vec::new()));
        let logger = Logger::builder()
            .threshold(Severity::Notice)
            .sink(recording("first", &records))
            .boxed_sink(Box::new(recording("second", &records)))
            .build();

        assert_eq!(logger.threshold(), Severity::Notice);
        assert_eq!(logger.sink_names(), ["first", "second"]);
        assert!(!logger.is_enabled(Severity::Info));
        assert!(logger.is_enabled(Severity::Notice));
    }

    #[test]
    fn test_builder_default() {
        let logger = LoggerBuilder::default().build();
        assert_eq!(logger.threshold(), Severity::Info);
        assert_eq!(logger.sink_count(), 0);
    }
}
