//! Error model for command plugins.
//!
//! Plugins report failure as a [`HandlerError`]: a status line plus optional
//! structured severity. This replaces the thrown-string idiom - severity is
//! metadata on the value, not a substring of free text, though the legacy
//! marker tokens are still honored at classification time (see
//! [`Severity::classify`]).

use thiserror::Error;

use crate::status::{Severity, StatusLine};

/// Result alias for plugin peek/process calls.
pub type Result<T> = std::result::Result<T, HandlerError>;

/// A command failure surfaced by a plugin or by the processor itself.
///
/// The status line is written verbatim into the response; the severity tag,
/// when present, overrides every other classification rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}")]
pub struct HandlerError {
    status: StatusLine,
    severity: Option<Severity>,
}

impl HandlerError {
    /// Failure with severity left to the classification rules.
    pub fn new(status: impl Into<StatusLine>) -> Self {
        HandlerError {
            status: status.into(),
            severity: None,
        }
    }

    /// Attach an explicit severity tag.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Failure tagged for operator attention.
    pub fn alert(status: impl Into<StatusLine>) -> Self {
        Self::new(status).with_severity(Severity::Alert)
    }

    /// Failure tagged as suspicious but survivable.
    pub fn warn(status: impl Into<StatusLine>) -> Self {
        Self::new(status).with_severity(Severity::Warn)
    }

    /// Failure tagged as merely odd.
    pub fn notice(status: impl Into<StatusLine>) -> Self {
        Self::new(status).with_severity(Severity::Notice)
    }

    /// The status line to report to the caller.
    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Log severity under the full classification precedence.
    pub fn severity(&self) -> Severity {
        Severity::classify(&self.status, self.severity)
    }
}

impl From<&str> for HandlerError {
    fn from(status: &str) -> Self {
        HandlerError::new(status)
    }
}

impl From<String> for HandlerError {
    fn from(status: String) -> Self {
        HandlerError::new(status)
    }
}

impl From<StatusLine> for HandlerError {
    fn from(status: StatusLine) -> Self {
        HandlerError::new(status)
    }
}
