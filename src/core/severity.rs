//! Severity level definitions

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered log severity, least severe first.
///
/// The derived `Ord` follows declaration order, so `Severity::Debug` is the
/// smallest value and `Severity::Emergency` the largest. Threshold filtering
/// relies on this order and nothing else.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Severity {
    Debug = 0,
    #[default]
    Info = 1,
    Notice = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Alert = 6,
    Emergency = 7,
}

impl Severity {
    /// All levels in ascending order.
    pub const ALL: [Severity; 8] = [
        Severity::Debug,
        Severity::Info,
        Severity::Notice,
        Severity::Warning,
        Severity::Error,
        Severity::Critical,
        Severity::Alert,
        Severity::Emergency,
    ];

    #[inline]
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Single-character code used in rendered output.
    ///
    /// Emergency and Error would collide on `E`, so Emergency uses a lower-case `e`.
    pub fn code(&self) -> char {
        match self {
            Severity::Debug => 'D',
            Severity::Info => 'I',
            Severity::Notice => 'N',
            Severity::Warning => 'W',
            Severity::Error => 'E',
            Severity::Critical => 'C',
            Severity::Alert => 'A',
            Severity::Emergency => 'e',
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Notice => "NOTICE",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
            Severity::Alert => "ALERT",
            Severity::Emergency => "EMERGENCY",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Severity::Debug => BrightBlack,
            Severity::Info => Green,
            Severity::Notice => Cyan,
            Severity::Warning => Yellow,
            Severity::Error => Red,
            Severity::Critical => BrightRed,
            Severity::Alert => Magenta,
            Severity::Emergency => BrightMagenta,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for Severity {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Codes match in either case, except that `e` is Emergency and `E` is Error.
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            let exact = Severity::ALL.iter().find(|level| level.code() == c);
            let folded = || {
                Severity::ALL
                    .iter()
                    .find(|level| level.code() == c.to_ascii_uppercase())
            };
            if let Some(level) = exact.or_else(folded) {
                return Ok(*level);
            }
        }

        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(Severity::Debug),
            "INFO" => Ok(Severity::Info),
            "NOTICE" => Ok(Severity::Notice),
            "WARNING" | "WARN" => Ok(Severity::Warning),
            "ERROR" | "ERR" => Ok(Severity::Error),
            "CRITICAL" | "CRIT" => Ok(Severity::Critical),
            "ALERT" => Ok(Severity::Alert),
            "EMERGENCY" | "EMERG" => Ok(Severity::Emergency),
            _ => Err(LoggerError::invalid_severity(s)),
        }
    }
}
