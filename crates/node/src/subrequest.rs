//! In-flight sub-request bookkeeping.
//!
//! A command may hold a sub-request issued to an external service on its
//! behalf (e.g. a vendor HTTPS call). The sub-request is owned by a separate
//! request-tracking context; the node's clean step releases the association
//! exactly once via [`HttpsManager::close_request`].

use std::sync::Arc;

use quorum_core::Response;

/// The request-tracking context that owns in-flight sub-requests.
pub trait HttpsManager: Send + Sync {
    /// Close and release a sub-request this manager owns.
    fn close_request(&self, request: &HttpsRequest);
}

/// An in-flight sub-request attached to a command.
pub struct HttpsRequest {
    /// The owning tracking context. `None` is a bookkeeping bug: the clean
    /// step error-logs it and still drops the request to avoid a leak.
    pub owner: Option<Arc<dyn HttpsManager>>,
    /// The sub-request's response so far, status line included.
    pub full_response: Response,
}

impl HttpsRequest {
    /// Attach a sub-request to its owning manager.
    pub fn new(owner: Arc<dyn HttpsManager>) -> Self {
        HttpsRequest {
            owner: Some(owner),
            full_response: Response::default(),
        }
    }

    /// A sub-request with no owner. Only reachable through a bookkeeping
    /// bug in the surrounding layer; constructible here so tests can cover
    /// the orphan path.
    pub fn orphaned() -> Self {
        HttpsRequest {
            owner: None,
            full_response: Response::default(),
        }
    }
}

impl std::fmt::Debug for HttpsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpsRequest")
            .field("owned", &self.owner.is_some())
            .field("full_response", &self.full_response)
            .finish()
    }
}
