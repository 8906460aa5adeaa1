//! Status-line taxonomy and log-severity classification.
//!
//! Every command outcome is reported as a status line: a three-digit code
//! followed by free text, reused as the response's method line. Codes fall
//! into four classes:
//!
//! | Class | Meaning |
//! |-------|---------|
//! | 2xx | Request valid and accepted |
//! | 3xx | Request valid but declined (redundant, rate-limited, ...) |
//! | 4xx | Request valid but failed (unauthorized, not found, ...) |
//! | 5xx | Internal/infrastructure failure; request validity unknown |
//!
//! 430 ("Unrecognized command") is the reserved 4xx code for a command that
//! no plugin claimed.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known status lines, returned verbatim in the response method line.
pub mod code {
    /// Request valid and accepted.
    pub const OK: &str = "200 OK";

    /// Request already satisfied by an earlier, identical request.
    pub const REDUNDANT: &str = "300 Redundant request";
    /// Rate or quota limit hit.
    pub const LIMIT_HIT: &str = "301 Limit hit";
    /// Validation code did not match.
    pub const INVALID_VALIDATE_CODE: &str = "302 Invalid validateCode";

    /// Request failed for an unclassified reason.
    pub const UNKNOWN_FAILURE: &str = "400 Unknown request failure";
    /// Caller is not authorized for this operation.
    pub const UNAUTHORIZED: &str = "401 Unauthorized";
    /// Required parameters missing.
    pub const INCOMPLETE: &str = "402 Incomplete request";
    /// Resource doesn't exist.
    pub const NOT_FOUND: &str = "404 Resource doesn't exist";
    /// Resource exists but is in the wrong state for this operation.
    pub const WRONG_STATE: &str = "405 Resource in incorrect state";
    /// Resource not ready yet, retry later.
    pub const NOT_READY: &str = "410 Resource not ready";
    /// Caller lacks the privilege level for this operation.
    pub const INSUFFICIENT_PRIVILEGES: &str = "411 Insufficient privileges";
    /// Node is down for maintenance.
    pub const MAINTENANCE: &str = "412 Down for maintenance";

    /// No plugin claimed the command.
    pub const UNRECOGNIZED_COMMAND: &str = "430 Unrecognized command";

    /// Unclassified server-side failure.
    pub const UNKNOWN_SERVER_FAILURE: &str = "500 Unknown server failure";
    /// Command abandoned by the scheduling layer.
    pub const ABORTED: &str = "500 ABORTED";
    /// The store refused to open a transaction.
    pub const BEGIN_FAILED: &str = "501 Failed to begin transaction";
    /// The store refused to prepare the transaction for commit.
    pub const PREPARE_FAILED: &str = "501 Failed to prepare transaction";
    /// Query execution failed.
    pub const QUERY_FAILED: &str = "502 Failed to execute query";
    /// Query ran but returned an unusable result.
    pub const INVALID_QUERY_RESPONSE: &str = "503 Query returned invalid response";
    /// Resource in an invalid state server-side.
    pub const INVALID_RESOURCE_STATE: &str = "504 Resource in invalid state";
    /// Upstream vendor error.
    pub const VENDOR_ERROR: &str = "507 Vendor error";
    /// Live operation disabled by configuration.
    pub const LIVE_DISABLED: &str = "508 Live operation not enabled";
    /// Operation timed out.
    pub const TIMEOUT: &str = "509 Operation timed out";
    /// Unexpected upstream response.
    pub const UNEXPECTED_RESPONSE: &str = "530 Unexpected response";
    /// Expected but unusable upstream response, retry later.
    pub const UNUSABLE_RESPONSE: &str = "531 Expected but unusable response, retry later";
    /// Upstream HTTP request/response failure, usually a timeout or 5xx.
    pub const UPSTREAM_HTTP_FAILURE: &str = "534 Unexpected HTTP request/response";
}

/// Legacy severity marker tokens embedded in status text by older plugins.
pub const ALERT_MARKER: &str = "_ALERT_";
/// See [`ALERT_MARKER`].
pub const WARN_MARKER: &str = "_WARN_";
/// See [`ALERT_MARKER`].
pub const HMMM_MARKER: &str = "_HMMM_";

/// A status line: three-digit code followed by free text.
///
/// The line is both a result code and a control signal. [`code`](Self::code)
/// parses the numeric prefix, [`class`](Self::class) buckets it, and
/// [`is_server_error`](Self::is_server_error) tests the five-hundred class
/// the way the error-classification rules require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLine(String);

impl StatusLine {
    /// Wrap a raw status line.
    pub fn new(line: impl Into<String>) -> Self {
        StatusLine(line.into())
    }

    /// The full line, code and text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the leading three-digit code, if the line carries one.
    pub fn code(&self) -> Option<u16> {
        let digits: String = self.0.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.len() == 3 {
            digits.parse().ok()
        } else {
            None
        }
    }

    /// Bucket the code into its taxonomy class.
    pub fn class(&self) -> StatusClass {
        match self.code() {
            Some(c) if (200..300).contains(&c) => StatusClass::Ok,
            Some(c) if (300..400).contains(&c) => StatusClass::Declined,
            Some(c) if (400..500).contains(&c) => StatusClass::Failed,
            Some(c) if (500..600).contains(&c) => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    /// True for the five-hundred class.
    pub fn is_server_error(&self) -> bool {
        self.class() == StatusClass::ServerError
    }

    /// True for the success class.
    pub fn is_ok(&self) -> bool {
        self.class() == StatusClass::Ok
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StatusLine {
    fn from(line: &str) -> Self {
        StatusLine(line.to_string())
    }
}

impl From<String> for StatusLine {
    fn from(line: String) -> Self {
        StatusLine(line)
    }
}

/// Taxonomy class of a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusClass {
    /// 2xx - valid and accepted.
    Ok,
    /// 3xx - valid but declined.
    Declined,
    /// 4xx - valid but failed.
    Failed,
    /// 5xx - internal/infrastructure failure.
    ServerError,
    /// No parseable three-digit code.
    Unknown,
}

/// Log severity for a command failure.
///
/// Severity is carried as structured metadata on the error value. The
/// classification rules fall back to the legacy marker tokens and the
/// five-hundred-class escalation for errors that carry no explicit tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    /// Needs operator attention.
    Alert,
    /// Suspicious but survivable.
    Warn,
    /// Odd enough to note.
    Notice,
    /// Routine.
    Info,
}

impl Severity {
    /// Classify a failure's log severity.
    ///
    /// Precedence, evaluated in order:
    /// 1. an explicit severity tag on the error value;
    /// 2. a legacy marker token embedded in the status text;
    /// 3. a leading "50" (five-hundred class), always escalated to
    ///    [`Severity::Alert`];
    /// 4. otherwise [`Severity::Info`].
    pub fn classify(status: &StatusLine, tag: Option<Severity>) -> Severity {
        if let Some(severity) = tag {
            return severity;
        }
        let text = status.as_str();
        if text.contains(ALERT_MARKER) {
            Severity::Alert
        } else if text.contains(WARN_MARKER) {
            Severity::Warn
        } else if text.contains(HMMM_MARKER) {
            Severity::Notice
        } else if text.starts_with("50") {
            // Internal failures get operator attention regardless of markers.
            Severity::Alert
        } else {
            Severity::Info
        }
    }
}
