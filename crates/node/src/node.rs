//! The command processor: peek and process as two state-transition
//! functions over a command and the transactional store.
//!
//! Peek is the read-only fast path: answer the command without touching
//! state, or hand it to the write queue. Process is the transactional write
//! path: open a transaction, dispatch, and either prepare the staged writes
//! for the external commit step or roll back. Every outcome - success,
//! decline, or infrastructure failure - ends as a status line plus optional
//! JSON body; nothing propagates past this layer.

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::{debug, error, info, warn};

use quorum_core::{code, HandlerError, Result, Severity};

use crate::command::Command;
use crate::context::{NodeConfig, NodeContext, NodeRole};
use crate::plugin::PluginRegistry;
use crate::store::TransactionalStore;

/// Reserved method line that triggers the database-upgrade broadcast,
/// matched case-insensitively.
///
/// Intended to run only on the leader, on its transition into that role;
/// the surrounding replication layer enforces that precondition, not this
/// core.
pub const UPGRADE_DIRECTIVE: &str = "UpgradeDatabase";

/// Result of a peek pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeekOutcome {
    /// The command is fully answered (successfully or with an error status);
    /// the response is final.
    Completed,
    /// Not peekable; route the command into the write-processing queue. The
    /// response is untouched.
    Queued,
}

/// A node's command processor.
///
/// Holds the plugin registry, the role context handed to plugins, and the
/// queue of commands awaiting a process pass. Process passes serialize
/// through a node-wide critical section because the store's transaction
/// boundary is not reentrant.
pub struct Node {
    context: NodeContext,
    registry: PluginRegistry,
    queued: Mutex<VecDeque<Command>>,
    write_lock: Mutex<()>,
}

impl Node {
    /// Build a node from configuration, an initial role, and the plugin
    /// registry assembled at startup.
    pub fn new(config: NodeConfig, role: NodeRole, registry: PluginRegistry) -> Self {
        info!(
            target: "quorum::node",
            name = %config.name,
            role = ?role,
            plugins = registry.len(),
            "Node constructed"
        );
        Node {
            context: NodeContext::new(config, role),
            registry,
            queued: Mutex::new(VecDeque::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// The role context handed to plugins.
    pub fn context(&self) -> &NodeContext {
        &self.context
    }

    /// Record a role transition reported by the consensus layer.
    pub fn set_role(&mut self, role: NodeRole) {
        self.context.set_role(role);
    }

    /// True when the node refuses to originate mutations.
    pub fn is_read_only(&self) -> bool {
        self.context.is_read_only()
    }

    // ------------------------------------------------------------------
    // Peek path
    // ------------------------------------------------------------------

    /// Attempt to answer a command without mutating state.
    ///
    /// Returns [`PeekOutcome::Queued`] when no plugin claims it - that is
    /// not an error, it routes the command to [`enqueue`](Self::enqueue) and
    /// a later process pass. On a plugin failure the error is classified,
    /// logged with the serialized request, written verbatim to the response
    /// status line, and the command still completes here.
    pub fn peek_command(
        &self,
        store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) -> PeekOutcome {
        debug!(target: "quorum::peek", method = %command.request.method_line, "Peeking at command");

        // Assume success; a failure overwrites the status line below.
        let prior_status = std::mem::take(&mut command.response.method_line);
        command.response.set_status(code::OK);

        match self.dispatch_peek(store, command) {
            Ok(PeekOutcome::Queued) => {
                info!(
                    target: "quorum::peek",
                    method = %command.request.method_line,
                    "Command is not peekable, queuing for processing"
                );
                // Not claimed: the response must leave peek untouched.
                command.response.method_line = prior_status;
                return PeekOutcome::Queued;
            }
            Ok(PeekOutcome::Completed) => {
                info!(
                    target: "quorum::peek",
                    method = %command.request.method_line,
                    status = %command.response.method_line,
                    "Responding to read-only command"
                );
                command.encode_content();
            }
            Err(err) => self.fail_command("read-only command", command, &err),
        }

        PeekOutcome::Completed
    }

    fn dispatch_peek(
        &self,
        store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) -> Result<PeekOutcome> {
        for plugin in self.registry.iter_enabled() {
            if plugin.peek(&self.context, store, command)? {
                info!(
                    target: "quorum::peek",
                    plugin = plugin.name(),
                    method = %command.request.method_line,
                    "Plugin peeked command"
                );
                return Ok(PeekOutcome::Completed);
            }
        }
        Ok(PeekOutcome::Queued)
    }

    // ------------------------------------------------------------------
    // Process path
    // ------------------------------------------------------------------

    /// Execute a command to a final, durable-or-rejected outcome.
    ///
    /// Opens a transaction, dispatches (upgrade broadcast or first-claim),
    /// then rolls back an empty transaction or prepares a non-empty one for
    /// the external commit step. On any failure the store is rolled back -
    /// regardless of prior state - and the error becomes the response.
    ///
    /// The whole pass runs inside the node-wide write critical section; the
    /// store's transaction boundary is not reentrant.
    pub fn process_command(
        &self,
        store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) {
        let _guard = self.write_lock.lock();
        debug!(target: "quorum::process", method = %command.request.method_line, "Received command");

        // Assume success; a failure overwrites the status line below.
        command.response.set_status(code::OK);

        match self.dispatch_process(store, command) {
            Ok(()) => {
                info!(
                    target: "quorum::process",
                    method = %command.request.method_line,
                    status = %command.response.method_line,
                    "Responding to command"
                );
                command.encode_content();
            }
            Err(err) => {
                // No write-capable transaction may survive a failed pass,
                // even if it was already rolled back.
                store.rollback();
                self.fail_command("command", command, &err);
            }
        }
    }

    fn dispatch_process(
        &self,
        store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) -> Result<()> {
        if !store.begin_transaction() {
            return Err(HandlerError::from(code::BEGIN_FAILED));
        }

        if command.request.is_method(UPGRADE_DIRECTIVE) {
            // Broadcast, not dispatch: every enabled plugin gets its chance
            // to upgrade its schema, in registry order.
            info!(target: "quorum::process", "Upgrading database");
            for plugin in self.registry.iter_enabled() {
                plugin.upgrade_database(&self.context, store);
            }
            info!(target: "quorum::process", "Finished upgrading database");
        } else {
            let mut claimed = false;
            for plugin in self.registry.iter_enabled() {
                if plugin.process(&self.context, store, command)? {
                    info!(
                        target: "quorum::process",
                        plugin = plugin.name(),
                        method = %command.request.method_line,
                        "Plugin processed command"
                    );
                    claimed = true;
                    break;
                }
            }
            if !claimed {
                warn!(
                    target: "quorum::process",
                    method = %command.request.method_line,
                    "Command does not exist"
                );
                return Err(HandlerError::from(code::UNRECOGNIZED_COMMAND));
            }
        }

        // An empty transaction is not worth committing; anything else is
        // prepared here and committed by the external replication step.
        if store.uncommitted_query().is_empty() {
            store.rollback();
        } else if !store.prepare() {
            return Err(HandlerError::from(code::PREPARE_FAILED));
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Abort / clean
    // ------------------------------------------------------------------

    /// Mark a command abandoned by the scheduling layer.
    ///
    /// Safe at any lifecycle point, including before peek ever ran. Performs
    /// no transaction cleanup; the caller owns any transaction state.
    pub fn abort_command(&self, command: &mut Command) {
        command.response.set_status(code::ABORTED);
    }

    /// Release a command's resources before it is discarded.
    ///
    /// Releases an attached sub-request through its owning context exactly
    /// once. A sub-request with no owner is a bookkeeping bug: it is logged
    /// as an error and the reference is still cleared to avoid a leak.
    /// No-op (and repeatable) when no sub-request is attached.
    pub fn clean_command(&self, command: &mut Command) {
        if let Some(https_request) = command.https_request.take() {
            match &https_request.owner {
                Some(owner) => owner.close_request(&https_request),
                None => error!(
                    target: "quorum::node",
                    status = %https_request.full_response.method_line,
                    "No owner for this https request"
                ),
            }
        }
    }

    // ------------------------------------------------------------------
    // Write queue
    // ------------------------------------------------------------------

    /// Queue a command that peek could not answer.
    pub fn enqueue(&self, command: Command) {
        self.queued.lock().push_back(command);
    }

    /// Next queued command for a process pass.
    pub fn dequeue(&self) -> Option<Command> {
        self.queued.lock().pop_front()
    }

    /// Number of commands awaiting processing.
    pub fn queued_len(&self) -> usize {
        self.queued.lock().len()
    }

    /// Method lines of the queued commands, oldest first.
    pub fn queued_method_lines(&self) -> Vec<String> {
        self.queued
            .lock()
            .iter()
            .map(|c| c.request.method_line.clone())
            .collect()
    }

    // ------------------------------------------------------------------
    // Shared failure normalization
    // ------------------------------------------------------------------

    /// Convert a failure into the response and log it at its classified
    /// severity, with the original request serialized for diagnosis.
    fn fail_command(&self, what: &str, command: &mut Command, err: &HandlerError) {
        let request = command.request.serialize_for_log();
        match err.severity() {
            Severity::Alert => error!(
                target: "quorum::node",
                kind = what,
                error = %err,
                request = %request,
                "Error processing command, ignoring"
            ),
            Severity::Warn => warn!(
                target: "quorum::node",
                kind = what,
                error = %err,
                request = %request,
                "Error processing command, ignoring"
            ),
            Severity::Notice => info!(
                target: "quorum::node",
                kind = what,
                marker = "hmmm",
                error = %err,
                request = %request,
                "Error processing command, ignoring"
            ),
            Severity::Info => info!(
                target: "quorum::node",
                kind = what,
                error = %err,
                request = %request,
                "Error processing command, ignoring"
            ),
        }
        command.response.set_status(err.status().as_str());
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Any command still queued at shutdown lost its process pass; that
        // is an anomaly worth an operator's attention.
        let queued = self.queued.get_mut();
        if !queued.is_empty() {
            let methods: Vec<&str> = queued
                .iter()
                .map(|c| c.request.method_line.as_str())
                .collect();
            error!(
                target: "quorum::node",
                queued = %serde_json::to_string(&methods).unwrap_or_default(),
                "Commands still queued at shutdown"
            );
        }
    }
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("context", &self.context)
            .field("registry", &self.registry)
            .field("queued", &self.queued_len())
            .finish()
    }
}
