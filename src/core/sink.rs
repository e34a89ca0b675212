//! Sink trait for log output destinations

use super::{error::Result, severity::Severity};

/// A destination that accepts one leveled, tagged message at a time.
///
/// Errors returned from `emit` never reach the caller of a logging method;
/// the [`Logger`](super::Logger) records them and moves on to the next sink.
pub trait Sink: Send {
    fn emit(&mut self, severity: Severity, tag: &str, text: &str) -> Result<()>;

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn emit(&mut self, severity: Severity, tag: &str, text: &str) -> Result<()> {
        (**self).emit(severity, tag, text)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
