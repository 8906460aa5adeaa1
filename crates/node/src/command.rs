//! The unit of work flowing through the node.
//!
//! A command wraps an inbound request, the mutable response under
//! construction, the content map plugins accumulate into, and an optional
//! in-flight sub-request. Lifecycle: received, peeked (may complete),
//! queued, processed (must complete), cleaned, dropped.

use std::collections::BTreeMap;

use tracing::warn;

use quorum_core::{Request, Response};

use crate::subrequest::HttpsRequest;

/// One command in flight through the node.
#[derive(Debug, Default)]
pub struct Command {
    /// The inbound call. Read-only once received.
    pub request: Request,
    /// The reply under construction; status line blank until a pass runs.
    pub response: Response,
    /// Content accumulated by plugins, serialized into the response body at
    /// the end of a successful pass.
    pub json_content: BTreeMap<String, String>,
    /// In-flight sub-request issued on behalf of this command, if any.
    pub https_request: Option<HttpsRequest>,
}

impl Command {
    /// Wrap a received request.
    pub fn new(request: Request) -> Self {
        Command {
            request,
            ..Command::default()
        }
    }

    /// Convenience constructor from a bare method line.
    pub fn from_method(method_line: impl Into<String>) -> Self {
        Command::new(Request::new(method_line))
    }

    /// Accumulate a content entry for the response body.
    pub fn set_content(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.json_content.insert(key.into(), value.into());
    }

    /// Serialize accumulated content into the response body.
    ///
    /// Runs at most once per pass, at the end of a successful peek or
    /// process. Pre-existing different body content is replaced - last
    /// writer wins - but the replacement is logged as a warning so the
    /// conflict leaves an audit trail. Identical content is left alone.
    pub fn encode_content(&mut self) {
        if self.json_content.is_empty() {
            return;
        }
        // A map of strings cannot fail to serialize.
        let new_content = serde_json::to_string(&self.json_content).unwrap_or_default();
        if self.response.content != new_content {
            if !self.response.content.is_empty() {
                warn!(
                    target: "quorum::command",
                    method = %self.request.method_line,
                    "Replacing existing response content"
                );
            }
            self.response.content = new_content;
        }
    }
}
