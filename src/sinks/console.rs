//! Console sink implementation

use crate::core::message::render_prefix;
use crate::core::{LoggerError, Result, Severity, Sink};
use chrono::Local;
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::{self, Write};

/// Local-time layout for the leading timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Writes `<timestamp> <code>/<tag>: <text>` lines, flushing after each one.
///
/// Writes to standard output by default; any other writer can be plugged in
/// with [`ConsoleSink::with_writer`].
pub struct ConsoleSink {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }

    /// Write lines to `writer` instead of standard output
    ///
    /// # Example
    ///
    /// ```
    /// use sinklog::sinks::ConsoleSink;
    ///
    /// let sink = ConsoleSink::with_writer(std::io::sink());
    /// ```
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
            use_colors: false,
        }
    }

    /// Highlight the `<code>/<tag>` prefix using the severity's color
    #[cfg(feature = "console")]
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn format_line(&self, severity: Severity, tag: &str, text: &str) -> String {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT);
        let prefix = self.format_prefix(severity, tag);
        format!("{} {}: {}", timestamp, prefix, text)
    }

    #[cfg(feature = "console")]
    fn format_prefix(&self, severity: Severity, tag: &str) -> String {
        let prefix = render_prefix(severity, tag);
        if self.use_colors {
            prefix.color(severity.color_code()).to_string()
        } else {
            prefix
        }
    }

    #[cfg(not(feature = "console"))]
    fn format_prefix(&self, severity: Severity, tag: &str) -> String {
        render_prefix(severity, tag)
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn emit(&mut self, severity: Severity, tag: &str, text: &str) -> Result<()> {
        let line = self.format_line(severity, tag, text);
        writeln!(self.writer, "{}", line)
            .and_then(|()| self.writer.flush())
            .map_err(|e| {
                LoggerError::io_operation("writing console line", format!("tag '{}'", tag), e)
            })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_line_format() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(buffer.clone());

        sink.emit(Severity::Warning, "disk", "low space").unwrap();

        let output = buffer.contents();
        assert!(output.ends_with(" W/disk: low space\n"), "got {:?}", output);

        let timestamp = output.split(" W/").next().unwrap();
        assert!(
            NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).is_ok(),
            "bad timestamp {:?}",
            timestamp
        );
    }

    #[test]
    fn test_one_line_per_emit() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(buffer.clone());

        sink.emit(Severity::Info, "a", "one").unwrap();
        sink.emit(Severity::Emergency, "b", "two").unwrap();

        let output = buffer.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("I/a: one"));
        assert!(lines[1].ends_with("e/b: two"));
    }

    #[cfg(feature = "console")]
    #[test]
    fn test_colors_disabled_by_default() {
        let buffer = SharedBuffer::default();
        let mut sink = ConsoleSink::with_writer(buffer.clone()).with_colors(false);

        sink.emit(Severity::Error, "tag", "plain").unwrap();
        assert!(!buffer.contents().contains('\u{1b}'));
    }

    #[test]
    fn test_write_error_is_reported() {
        let mut sink = ConsoleSink::with_writer(BrokenPipe);
        let err = sink.emit(Severity::Info, "tag", "lost").unwrap_err();
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }
}
