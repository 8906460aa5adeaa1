//! QuorumDB - a node core for a replicated, transactional data store.
//!
//! QuorumDB turns a cluster of processes into a single logically-consistent
//! database with synchronous replication. This crate is the node's command
//! processor: it classifies inbound requests as read-only ("peek") or
//! mutating ("process"), dispatches them through an ordered plugin registry,
//! wraps execution in a transaction, and normalizes every outcome into a
//! status line plus a JSON body.
//!
//! The consensus protocol that elects a leader and replicates prepared
//! transactions, the network layer, and the embedded SQL engine are external
//! collaborators reached through narrow traits
//! ([`TransactionalStore`], [`HttpsManager`]).
//!
//! # Quick Start
//!
//! ```ignore
//! use quorumdb::{Command, Node, NodeConfig, NodeRole, PeekOutcome, PluginRegistry};
//!
//! let mut registry = PluginRegistry::new();
//! registry.register(my_accounts_plugin);
//!
//! let node = Node::new(NodeConfig::default(), NodeRole::Leader, registry);
//!
//! let mut command = Command::from_method("GetAccount");
//! if node.peek_command(&mut store, &mut command) == PeekOutcome::Queued {
//!     node.enqueue(command);
//! }
//! ```

// Re-export the public API from quorum-node (which re-exports the
// quorum-core vocabulary).
pub use quorum_node::*;
