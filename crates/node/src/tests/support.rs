//! Scripted fakes shared by the processor test suites.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use quorum_core::{HandlerError, Result};

use crate::command::Command;
use crate::context::NodeContext;
use crate::plugin::Plugin;
use crate::store::TransactionalStore;
use crate::subrequest::{HttpsManager, HttpsRequest};

/// A store that records transaction-boundary calls and fails on cue.
#[derive(Default)]
pub struct ScriptedStore {
    refuse_begin: bool,
    refuse_prepare: bool,
    uncommitted: String,
    pub begin_calls: usize,
    pub write_calls: usize,
    pub prepare_calls: usize,
    pub rollback_calls: usize,
}

impl ScriptedStore {
    pub fn new() -> Self {
        ScriptedStore::default()
    }

    pub fn refusing_begin() -> Self {
        ScriptedStore {
            refuse_begin: true,
            ..ScriptedStore::default()
        }
    }

    pub fn refusing_prepare() -> Self {
        ScriptedStore {
            refuse_prepare: true,
            ..ScriptedStore::default()
        }
    }
}

impl TransactionalStore for ScriptedStore {
    fn begin_transaction(&mut self) -> bool {
        self.begin_calls += 1;
        !self.refuse_begin
    }

    fn write(&mut self, query: &str) -> bool {
        self.write_calls += 1;
        self.uncommitted.push_str(query);
        true
    }

    fn uncommitted_query(&self) -> &str {
        &self.uncommitted
    }

    fn prepare(&mut self) -> bool {
        self.prepare_calls += 1;
        !self.refuse_prepare
    }

    fn rollback(&mut self) {
        self.rollback_calls += 1;
        self.uncommitted.clear();
    }
}

/// What a fake plugin does when offered a command.
#[derive(Clone)]
pub enum Claim {
    /// Decline the command.
    Pass,
    /// Claim it.
    Claim,
    /// Fail it with this error.
    Fail(HandlerError),
}

/// A plugin scripted per-path, recording every call.
pub struct FakePlugin {
    name: String,
    enabled: bool,
    on_peek: Claim,
    on_process: Claim,
    /// Query staged through the store when a process claim succeeds.
    write_on_process: Option<String>,
    /// Content entries added on any successful claim.
    content: Vec<(String, String)>,
    /// Shared recorder of upgrade_database invocations, in call order.
    upgrade_log: Option<Arc<Mutex<Vec<String>>>>,
    pub peek_calls: AtomicUsize,
    pub process_calls: AtomicUsize,
    pub upgrade_calls: AtomicUsize,
}

impl FakePlugin {
    pub fn new(name: &str) -> Self {
        FakePlugin {
            name: name.to_string(),
            enabled: true,
            on_peek: Claim::Pass,
            on_process: Claim::Pass,
            write_on_process: None,
            content: Vec::new(),
            upgrade_log: None,
            peek_calls: AtomicUsize::new(0),
            process_calls: AtomicUsize::new(0),
            upgrade_calls: AtomicUsize::new(0),
        }
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn on_peek(mut self, claim: Claim) -> Self {
        self.on_peek = claim;
        self
    }

    pub fn on_process(mut self, claim: Claim) -> Self {
        self.on_process = claim;
        self
    }

    pub fn writing(mut self, query: &str) -> Self {
        self.write_on_process = Some(query.to_string());
        self
    }

    pub fn with_content(mut self, key: &str, value: &str) -> Self {
        self.content.push((key.to_string(), value.to_string()));
        self
    }

    pub fn logging_upgrades(mut self, log: Arc<Mutex<Vec<String>>>) -> Self {
        self.upgrade_log = Some(log);
        self
    }

    fn apply_content(&self, command: &mut Command) {
        for (key, value) in &self.content {
            command.set_content(key.clone(), value.clone());
        }
    }
}

impl Plugin for FakePlugin {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn peek(
        &self,
        _ctx: &NodeContext,
        _store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) -> Result<bool> {
        self.peek_calls.fetch_add(1, Ordering::SeqCst);
        match &self.on_peek {
            Claim::Pass => Ok(false),
            Claim::Claim => {
                self.apply_content(command);
                Ok(true)
            }
            Claim::Fail(err) => Err(err.clone()),
        }
    }

    fn process(
        &self,
        _ctx: &NodeContext,
        store: &mut dyn TransactionalStore,
        command: &mut Command,
    ) -> Result<bool> {
        self.process_calls.fetch_add(1, Ordering::SeqCst);
        match &self.on_process {
            Claim::Pass => Ok(false),
            Claim::Claim => {
                self.apply_content(command);
                if let Some(query) = &self.write_on_process {
                    store.write(query);
                }
                Ok(true)
            }
            Claim::Fail(err) => Err(err.clone()),
        }
    }

    fn upgrade_database(&self, _ctx: &NodeContext, store: &mut dyn TransactionalStore) {
        self.upgrade_calls.fetch_add(1, Ordering::SeqCst);
        store.write(&format!("CREATE TABLE IF NOT EXISTS {};", self.name));
        if let Some(log) = &self.upgrade_log {
            log.lock().push(self.name.clone());
        }
    }
}

/// A sub-request owner that counts how many times it was asked to close.
#[derive(Default)]
pub struct CountingManager {
    pub closed: AtomicUsize,
}

impl HttpsManager for CountingManager {
    fn close_request(&self, _request: &HttpsRequest) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}
