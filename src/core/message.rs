//! Message materialization

use super::severity::Severity;
use std::any::Any;
use std::fmt::{self, Display, Write};
use std::panic::{self, AssertUnwindSafe};

/// Marker written in place of a fragment whose `Display` impl fails or panics.
pub const UNRENDERABLE_FRAGMENT: &str = "<?>";

/// Concatenate message fragments into a single string.
///
/// Each fragment is rendered with its `Display` impl and appended with no
/// separator. A fragment that reports `fmt::Error` or panics is replaced by
/// [`UNRENDERABLE_FRAGMENT`]; anything it wrote before failing is discarded.
/// Panics are reported on stderr and never reach the caller.
///
/// # Example
///
/// ```
/// use sinklog::core::message::concat_fragments;
///
/// let text = concat_fragments(&[&"int: ", &42, &", double: ", &3.14]);
/// assert_eq!(text, "int: 42, double: 3.14");
/// ```
pub fn concat_fragments(fragments: &[&dyn Display]) -> String {
    let mut text = String::new();
    for (idx, fragment) in fragments.iter().enumerate() {
        let mark = text.len();
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| write!(text, "{}", fragment)));

        let failed = match rendered {
            Ok(Ok(())) => false,
            Ok(Err(fmt::Error)) => true,
            Err(panic_info) => {
                eprintln!(
                    "[SINKLOG ERROR] Fragment #{} panicked while rendering: {}",
                    idx,
                    panic_message(&*panic_info)
                );
                true
            }
        };

        if failed {
            text.truncate(mark);
            text.push_str(UNRENDERABLE_FRAGMENT);
        }
    }
    text
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// A single leveled, tagged message.
///
/// Messages only live for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub severity: Severity,
    pub tag: String,
    pub text: String,
}

impl Message {
    pub fn new(severity: Severity, tag: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            severity,
            tag: tag.into(),
            text: text.into(),
        }
    }

    pub fn from_fragments(severity: Severity, tag: &str, fragments: &[&dyn Display]) -> Self {
        Self::new(severity, tag, concat_fragments(fragments))
    }

    /// `<code>/<tag>`
    pub fn prefix(&self) -> String {
        render_prefix(self.severity, &self.tag)
    }
}

/// Renders `<code>/<tag>: <text>`, the body shared by every sink.
impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}: {}", self.severity.code(), self.tag, self.text)
    }
}

pub(crate) fn render_prefix(severity: Severity, tag: &str) -> String {
    format!("{}/{}", severity.code(), tag)
}

pub(crate) fn render_body(severity: Severity, tag: &str, text: &str) -> String {
    format!("{}: {}", render_prefix(severity, tag), text)
}
