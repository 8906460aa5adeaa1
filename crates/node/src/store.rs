//! Transaction-boundary contract of the embedded SQL engine.
//!
//! The engine itself is an external collaborator; the node only depends on
//! the narrow transaction contract below. `begin_transaction` and `prepare`
//! report failure as `false` - the engine logs its own diagnostics, and the
//! processor maps refusals onto the 501 status lines.

/// The transaction boundary of the embedded SQL engine.
///
/// Not reentrant: at most one transaction may be open against a store at a
/// time. The node serializes process passes to honor this (see
/// [`Node::process_command`](crate::Node::process_command)).
///
/// A transaction opened for a process pass is either prepared (and handed to
/// the external commit/replication step) or rolled back before the pass
/// returns - never left open.
pub trait TransactionalStore {
    /// Open a transaction. Returns `false` if the engine refuses.
    fn begin_transaction(&mut self) -> bool;

    /// Stage a mutation inside the open transaction.
    ///
    /// Staged writes accumulate into the uncommitted query until the
    /// transaction is prepared or rolled back. Returns `false` if the engine
    /// rejects the statement.
    fn write(&mut self, query: &str) -> bool;

    /// The writes staged so far; empty iff the transaction is read-only.
    fn uncommitted_query(&self) -> &str;

    /// Prepare the staged writes for commit. Returns `false` on failure.
    ///
    /// A prepared transaction is committed by the external replication step,
    /// not by this node core.
    fn prepare(&mut self) -> bool;

    /// Discard the open transaction and all staged writes.
    ///
    /// Safe to call with no transaction open.
    fn rollback(&mut self);
}
