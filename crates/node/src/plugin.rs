//! Command plugins and the ordered registry that dispatches to them.
//!
//! Each plugin implements one or more command families (account operations,
//! bank operations, ...). The node is agnostic to what they do; it only
//! relies on the claim protocol: during peek and during process, at most one
//! plugin claims a given command, first claim in registry order wins.

use std::sync::Arc;

use quorum_core::Result;

use crate::command::Command;
use crate::context::NodeContext;
use crate::store::TransactionalStore;

/// A pluggable command handler.
///
/// `peek` and `process` return `Ok(true)` to claim the command, `Ok(false)`
/// to pass, and `Err` to fail it - the processor converts the error into the
/// response, so failures never propagate past the node core.
pub trait Plugin: Send + Sync {
    /// Plugin name, for logging.
    fn name(&self) -> &str;

    /// Whether this plugin participates in dispatch.
    fn enabled(&self) -> bool {
        true
    }

    /// Attempt to answer the command without mutating state.
    fn peek(
        &self,
        _ctx: &NodeContext,
        _store: &mut dyn TransactionalStore,
        _command: &mut Command,
    ) -> Result<bool> {
        Ok(false)
    }

    /// Execute the command inside the open transaction.
    fn process(
        &self,
        _ctx: &NodeContext,
        _store: &mut dyn TransactionalStore,
        _command: &mut Command,
    ) -> Result<bool> {
        Ok(false)
    }

    /// Upgrade this plugin's schema. Broadcast to every enabled plugin when
    /// the upgrade directive runs; no claim semantics.
    fn upgrade_database(&self, _ctx: &NodeContext, _store: &mut dyn TransactionalStore) {}
}

/// Ordered plugin list, constructed at startup and handed to the node.
///
/// Iteration order is registration order; disabled plugins are skipped at
/// dispatch time (a plugin may flip `enabled` at runtime).
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        PluginRegistry::default()
    }

    /// Append a plugin. Dispatch visits plugins in registration order.
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        self.plugins.push(plugin);
    }

    /// Enabled plugins in registration order.
    pub fn iter_enabled(&self) -> impl Iterator<Item = &Arc<dyn Plugin>> {
        self.plugins.iter().filter(|p| p.enabled())
    }

    /// Number of registered plugins, enabled or not.
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// True when no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }
}

impl std::fmt::Debug for PluginRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("PluginRegistry").field("plugins", &names).finish()
    }
}
