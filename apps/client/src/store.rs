//! Snapshot store — the single source of truth for one application's live state.
//!
//! ARCHITECTURAL RULE: only the stream client writes to the store. Everything
//! else holds a read-only [`StoreReader`] and recomputes derived views from it.

use tokio::sync::watch;

use crate::models::JobApplicationSnapshot;

/// Stream-level faults surfaced to consumers through the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamFault {
    /// Terminal `stream.error` message from the server.
    Server(String),
    /// A snapshot payload that failed to deserialize. The subscription
    /// survives; the faulty message is skipped.
    BadSnapshot(String),
}

impl StreamFault {
    pub fn message(&self) -> &str {
        match self {
            Self::Server(msg) | Self::BadSnapshot(msg) => msg,
        }
    }
}

/// Everything a consumer can observe about one live application.
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    /// Latest full snapshot, replaced wholesale on every stream message.
    pub snapshot: Option<JobApplicationSnapshot>,
    /// Whether the live stream is currently open.
    pub connected: bool,
    /// Last stream-level fault, if any. Cleared on reconnect, never by a
    /// snapshot update.
    pub fault: Option<StreamFault>,
}

/// Write half of the store. Held by the stream client.
///
/// Every operation is a plain state replacement; none can fail or panic.
/// Readers obtained via [`SnapshotStore::subscribe`] see each change.
#[derive(Debug)]
pub struct SnapshotStore {
    tx: watch::Sender<StoreState>,
}

/// Read half: a latest-value subscription to the store.
pub type StoreReader = watch::Receiver<StoreState>;

impl SnapshotStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(StoreState::default());
        Self { tx }
    }

    pub fn subscribe(&self) -> StoreReader {
        self.tx.subscribe()
    }

    /// Replaces the stored snapshot wholesale. There are no merge or patch
    /// semantics; the backend always sends complete state.
    pub fn update_snapshot(&self, snapshot: JobApplicationSnapshot) {
        self.tx.send_modify(|state| state.snapshot = Some(snapshot));
    }

    pub fn set_connected(&self, connected: bool) {
        self.tx.send_modify(|state| state.connected = connected);
    }

    pub fn set_fault(&self, fault: StreamFault) {
        self.tx.send_modify(|state| state.fault = Some(fault));
    }

    /// Clears the last fault; the snapshot is left untouched.
    pub fn clear_fault(&self) {
        self.tx.send_modify(|state| state.fault = None);
    }

    /// Current state, cloned out. Prefer [`subscribe`](Self::subscribe) for
    /// anything that needs to react to changes.
    pub fn state(&self) -> StoreState {
        self.tx.borrow().clone()
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}
