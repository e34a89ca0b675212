//! System log sink implementation
//!
//! Wraps `openlog(3)`, `syslog(3)` and `closelog(3)`. The platform keeps a
//! single channel per process, so every [`SyslogSink`] shares it: the most
//! recently opened identity is the one shown in log entries, and the channel
//! is closed when the last sink is dropped.

use crate::core::message::render_body;
use crate::core::{LoggerError, Result, Severity, Sink};
use libc::c_int;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::ffi::CString;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// `openlog` option flags
///
/// # Example
///
/// ```
/// use sinklog::sinks::SyslogOptions;
///
/// let options = SyslogOptions::PID | SyslogOptions::NO_DELAY;
/// assert!(options.contains(SyslogOptions::PID));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SyslogOptions(c_int);

impl SyslogOptions {
    /// Write to the system console if the log channel is unavailable
    pub const CONSOLE: Self = Self(libc::LOG_CONS);
    /// Open the channel immediately
    pub const NO_DELAY: Self = Self(libc::LOG_NDELAY);
    /// Do not wait for child processes created while logging
    pub const NO_WAIT: Self = Self(libc::LOG_NOWAIT);
    /// Open the channel on the first message
    pub const DELAYED: Self = Self(libc::LOG_ODELAY);
    /// Also print each message to stderr
    #[cfg(any(
        target_os = "linux",
        target_os = "android",
        target_vendor = "apple",
        target_os = "freebsd",
        target_os = "netbsd",
        target_os = "openbsd",
        target_os = "dragonfly"
    ))]
    pub const PERROR: Self = Self(libc::LOG_PERROR);
    /// Include the process id in each entry
    pub const PID: Self = Self(libc::LOG_PID);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn bits(&self) -> c_int {
        self.0
    }

    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl Default for SyslogOptions {
    fn default() -> Self {
        Self::PID
    }
}

impl BitOr for SyslogOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for SyslogOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Facility category passed to `openlog`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SyslogFacility {
    Auth,
    AuthPrivate,
    Cron,
    Daemon,
    Ftp,
    Kernel,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
    LinePrinter,
    Mail,
    News,
    Syslog,
    #[default]
    User,
    Uucp,
}

impl SyslogFacility {
    pub fn as_raw(&self) -> c_int {
        match self {
            SyslogFacility::Auth => libc::LOG_AUTH,
            SyslogFacility::AuthPrivate => libc::LOG_AUTHPRIV,
            SyslogFacility::Cron => libc::LOG_CRON,
            SyslogFacility::Daemon => libc::LOG_DAEMON,
            SyslogFacility::Ftp => libc::LOG_FTP,
            SyslogFacility::Kernel => libc::LOG_KERN,
            SyslogFacility::Local0 => libc::LOG_LOCAL0,
            SyslogFacility::Local1 => libc::LOG_LOCAL1,
            SyslogFacility::Local2 => libc::LOG_LOCAL2,
            SyslogFacility::Local3 => libc::LOG_LOCAL3,
            SyslogFacility::Local4 => libc::LOG_LOCAL4,
            SyslogFacility::Local5 => libc::LOG_LOCAL5,
            SyslogFacility::Local6 => libc::LOG_LOCAL6,
            SyslogFacility::Local7 => libc::LOG_LOCAL7,
            SyslogFacility::LinePrinter => libc::LOG_LPR,
            SyslogFacility::Mail => libc::LOG_MAIL,
            SyslogFacility::News => libc::LOG_NEWS,
            SyslogFacility::Syslog => libc::LOG_SYSLOG,
            SyslogFacility::User => libc::LOG_USER,
            SyslogFacility::Uucp => libc::LOG_UUCP,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            SyslogFacility::Auth => "auth",
            SyslogFacility::AuthPrivate => "authpriv",
            SyslogFacility::Cron => "cron",
            SyslogFacility::Daemon => "daemon",
            SyslogFacility::Ftp => "ftp",
            SyslogFacility::Kernel => "kern",
            SyslogFacility::Local0 => "local0",
            SyslogFacility::Local1 => "local1",
            SyslogFacility::Local2 => "local2",
            SyslogFacility::Local3 => "local3",
            SyslogFacility::Local4 => "local4",
            SyslogFacility::Local5 => "local5",
            SyslogFacility::Local6 => "local6",
            SyslogFacility::Local7 => "local7",
            SyslogFacility::LinePrinter => "lpr",
            SyslogFacility::Mail => "mail",
            SyslogFacility::News => "news",
            SyslogFacility::Syslog => "syslog",
            SyslogFacility::User => "user",
            SyslogFacility::Uucp => "uucp",
        }
    }
}

impl fmt::Display for SyslogFacility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for SyslogFacility {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "auth" => Ok(SyslogFacility::Auth),
            "authpriv" | "auth-private" => Ok(SyslogFacility::AuthPrivate),
            "cron" => Ok(SyslogFacility::Cron),
            "daemon" => Ok(SyslogFacility::Daemon),
            "ftp" => Ok(SyslogFacility::Ftp),
            "kern" | "kernel" => Ok(SyslogFacility::Kernel),
            "local0" => Ok(SyslogFacility::Local0),
            "local1" => Ok(SyslogFacility::Local1),
            "local2" => Ok(SyslogFacility::Local2),
            "local3" => Ok(SyslogFacility::Local3),
            "local4" => Ok(SyslogFacility::Local4),
            "local5" => Ok(SyslogFacility::Local5),
            "local6" => Ok(SyslogFacility::Local6),
            "local7" => Ok(SyslogFacility::Local7),
            "lpr" | "line-printer" => Ok(SyslogFacility::LinePrinter),
            "mail" => Ok(SyslogFacility::Mail),
            "news" => Ok(SyslogFacility::News),
            "syslog" => Ok(SyslogFacility::Syslog),
            "user" => Ok(SyslogFacility::User),
            "uucp" => Ok(SyslogFacility::Uucp),
            _ => Err(LoggerError::config(
                "SyslogFacility",
                format!("unknown facility '{}'", s),
            )),
        }
    }
}

/// Platform priority for a severity
pub fn syslog_priority(severity: Severity) -> c_int {
    match severity {
        Severity::Emergency => libc::LOG_EMERG,
        Severity::Alert => libc::LOG_ALERT,
        Severity::Critical => libc::LOG_CRIT,
        Severity::Error => libc::LOG_ERR,
        Severity::Warning => libc::LOG_WARNING,
        Severity::Notice => libc::LOG_NOTICE,
        Severity::Info => libc::LOG_INFO,
        Severity::Debug => libc::LOG_DEBUG,
    }
}

/// Shared state of the process-wide channel.
///
/// `openlog` keeps the identity pointer rather than copying it, so the
/// latest identity lives here until the channel is closed.
struct Channel {
    identity: Option<CString>,
    open_sinks: usize,
}

static CHANNEL: Lazy<Mutex<Channel>> = Lazy::new(|| {
    Mutex::new(Channel {
        identity: None,
        open_sinks: 0,
    })
});

#[cfg(test)]
fn open_sink_count() -> usize {
    CHANNEL.lock().open_sinks
}

#[cfg(test)]
fn channel_identity() -> Option<String> {
    CHANNEL
        .lock()
        .identity
        .as_ref()
        .map(|raw| raw.to_string_lossy().into_owned())
}

/// Sends messages to the system log as `<code>/<tag>: <text>`.
///
/// # Example
///
/// ```no_run
/// use sinklog::prelude::*;
///
/// let logger = Logger::new();
/// logger.add_sink(SyslogSink::new(
///     "myapp",
///     SyslogOptions::PID | SyslogOptions::NO_DELAY,
///     SyslogFacility::Daemon,
/// )?);
/// logger.notice("boot", &[&"ready"]);
/// # Ok::<(), sinklog::LoggerError>(())
/// ```
#[derive(Debug)]
pub struct SyslogSink {
    identity: String,
    options: SyslogOptions,
    facility: SyslogFacility,
}

impl SyslogSink {
    /// Open the system log channel under `identity`.
    ///
    /// Fails without opening anything if `identity` contains a NUL byte.
    pub fn new(
        identity: impl Into<String>,
        options: SyslogOptions,
        facility: SyslogFacility,
    ) -> Result<Self> {
        let identity = identity.into();
        let raw_identity = CString::new(identity.as_str()).map_err(|_| {
            LoggerError::config(
                "SyslogSink",
                format!("identity {:?} contains a NUL byte", identity),
            )
        })?;

        let mut channel = CHANNEL.lock();
        // SAFETY: the identity buffer is kept in CHANNEL until closelog runs.
        unsafe {
            libc::openlog(raw_identity.as_ptr(), options.bits(), facility.as_raw());
        }
        channel.identity = Some(raw_identity);
        channel.open_sinks += 1;

        Ok(Self {
            identity,
            options,
            facility,
        })
    }

    /// Open with the default options (`PID`) and facility (`User`)
    pub fn with_identity(identity: impl Into<String>) -> Result<Self> {
        Self::new(identity, SyslogOptions::default(), SyslogFacility::default())
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn options(&self) -> SyslogOptions {
        self.options
    }

    pub fn facility(&self) -> SyslogFacility {
        self.facility
    }

    /// Priority passed to `syslog`, carrying this sink's own facility.
    ///
    /// A later `openlog` replaces the process default facility, so it is
    /// never relied on.
    pub fn priority(&self, severity: Severity) -> c_int {
        syslog_priority(severity) | self.facility.as_raw()
    }
}

impl Sink for SyslogSink {
    fn emit(&mut self, severity: Severity, tag: &str, text: &str) -> Result<()> {
        let body = render_body(severity, tag, text).replace('\0', "\\0");
        // Cannot fail: every NUL byte was escaped above.
        let body = CString::new(body).map_err(|e| LoggerError::writer(e.to_string()))?;

        // Held so a concurrent open or close cannot swap the identity mid-call.
        let _channel = CHANNEL.lock();
        // SAFETY: both pointers are NUL-terminated and outlive the call; the
        // message goes through "%s" so it is never parsed as a format string.
        unsafe {
            libc::syslog(self.priority(severity), c"%s".as_ptr(), body.as_ptr());
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

impl Drop for SyslogSink {
    fn drop(&mut self) {
        let mut channel = CHANNEL.lock();
        channel.open_sinks = channel.open_sinks.saturating_sub(1);
        if channel.open_sinks == 0 {
            // SAFETY: no sink references the channel any more.
            unsafe {
                libc::closelog();
            }
            channel.identity = None;
        }
    }
}
