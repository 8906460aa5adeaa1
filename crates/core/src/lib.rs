//! # QuorumDB Core
//!
//! Shared vocabulary for QuorumDB nodes: the status-line taxonomy, the
//! request/response message types, and the typed error model used by command
//! plugins.
//!
//! Higher layers (the node crate) build the command processor on top of
//! these types; nothing here touches storage or the network.

#![warn(missing_docs)]

pub mod error;
pub mod message;
pub mod status;

pub use error::{HandlerError, Result};
pub use message::{Request, Response};
pub use status::{code, Severity, StatusClass, StatusLine};
