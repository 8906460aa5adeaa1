//! Node role context and configuration.
//!
//! The consensus layer that elects a primary lives outside this crate; it
//! reports the current role through [`NodeContext`] so plugins and the
//! surrounding scheduler can gate role-dependent paths (the database-upgrade
//! broadcast is only meaningful on the authoritative writer).

use serde::{Deserialize, Serialize};

/// Role of this node within the cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    /// The authoritative writer; mutations originate here.
    Leader,
    /// A replica; receives committed transactions from the leader.
    Follower,
}

/// Static node configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Node name, used in logs.
    pub name: String,
    /// When set, the node refuses to originate mutations.
    pub read_only: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig {
            name: "node".to_string(),
            read_only: false,
        }
    }
}

/// Role and configuration handed to plugins on every peek/process call.
#[derive(Debug, Clone)]
pub struct NodeContext {
    role: NodeRole,
    config: NodeConfig,
}

impl NodeContext {
    /// Build a context from configuration and an initial role.
    pub fn new(config: NodeConfig, role: NodeRole) -> Self {
        NodeContext { config, role }
    }

    /// Current role.
    pub fn role(&self) -> NodeRole {
        self.role
    }

    /// True when this node is the authoritative writer.
    pub fn is_leader(&self) -> bool {
        self.role == NodeRole::Leader
    }

    /// True when the node refuses to originate mutations.
    pub fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    /// Node name for logging.
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Record a role transition reported by the consensus layer.
    pub fn set_role(&mut self, role: NodeRole) {
        self.role = role;
    }
}
