//! # QuorumDB Node
//!
//! The command processor of a QuorumDB node: the state machine that turns an
//! inbound request into a final status line and JSON body while keeping the
//! embedded SQL store's transaction discipline intact.
//!
//! A command flows: received -> [`Node::peek_command`] (read-only fast path,
//! may fully answer it) -> queued -> [`Node::process_command`] (transactional
//! write path, must answer it) -> [`Node::clean_command`] -> dropped. The
//! consensus layer that elects a leader and replicates prepared transactions
//! sits outside this crate, as does the SQL engine behind
//! [`TransactionalStore`].
//!
//! ```ignore
//! use quorum_node::{Command, Node, NodeConfig, NodeRole, PeekOutcome, PluginRegistry};
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(accounts_plugin);
//!
//! let node = Node::new(NodeConfig::default(), NodeRole::Leader, registry);
//!
//! let mut command = Command::from_method("GetAccount");
//! if node.peek_command(&mut store, &mut command) == PeekOutcome::Queued {
//!     node.enqueue(command);
//!     // ... later, on the write path:
//!     let mut command = node.dequeue().unwrap();
//!     node.process_command(&mut store, &mut command);
//! }
//! ```

#![warn(missing_docs)]

pub mod command;
pub mod context;
pub mod node;
pub mod plugin;
pub mod store;
pub mod subrequest;

#[cfg(test)]
mod tests;

pub use command::Command;
pub use context::{NodeConfig, NodeContext, NodeRole};
pub use node::{Node, PeekOutcome, UPGRADE_DIRECTIVE};
pub use plugin::{Plugin, PluginRegistry};
pub use store::TransactionalStore;
pub use subrequest::{HttpsManager, HttpsRequest};

// Re-export the core vocabulary so plugin crates only need quorum-node.
pub use quorum_core::{
    code, HandlerError, Request, Response, Result, Severity, StatusClass, StatusLine,
};
