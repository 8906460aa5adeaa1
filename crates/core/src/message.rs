//! Request and response message types.
//!
//! A request is a method line (the operation name) plus named parameters,
//! immutable once received. A response reuses the method-line slot as a
//! status line plus an optional serialized body.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::status::StatusLine;

/// An inbound call: operation name plus named parameters.
///
/// Parameters live in a `BTreeMap` so iteration and log serialization are
/// deterministic. The request is read-only once it enters the processor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// The requested operation name, e.g. `"GetAccount"`.
    pub method_line: String,
    /// Named parameters.
    pub params: BTreeMap<String, String>,
}

impl Request {
    /// Create a request with no parameters.
    pub fn new(method_line: impl Into<String>) -> Self {
        Request {
            method_line: method_line.into(),
            params: BTreeMap::new(),
        }
    }

    /// Builder-style parameter insertion.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Look up a named parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Case-insensitive method-line match, used for reserved directives.
    pub fn is_method(&self, method: &str) -> bool {
        self.method_line.eq_ignore_ascii_case(method)
    }

    /// Single-line form for diagnostics: method line plus JSON params.
    ///
    /// Embedded in every failure log so the original request survives for
    /// diagnosis.
    pub fn serialize_for_log(&self) -> String {
        // A map of strings cannot fail to serialize.
        let params = serde_json::to_string(&self.params).unwrap_or_default();
        format!("{} {}", self.method_line, params)
    }
}

/// An outgoing reply: status line plus optional serialized body.
///
/// The status line is blank until a peek or process pass runs; afterwards it
/// is either 200-class or an error line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// The status line, e.g. `"200 OK"`.
    pub method_line: String,
    /// Serialized body, empty if the command produced none.
    pub content: String,
}

impl Response {
    /// The status line as a typed [`StatusLine`].
    pub fn status(&self) -> StatusLine {
        StatusLine::from(self.method_line.as_str())
    }

    /// Overwrite the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.method_line = status.into();
    }

    /// True before any pass has touched this response.
    pub fn is_blank(&self) -> bool {
        self.method_line.is_empty() && self.content.is_empty()
    }
}
