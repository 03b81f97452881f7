//! Live status plumbing: spawning a stream subscription into a store and
//! driving the focused-phase auto-advance the status view relies on.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::config::Config;
use crate::errors::StreamError;
use crate::projector::{Phase, PhaseState, PhaseStatus};
use crate::store::{SnapshotStore, StoreReader};
use crate::stream::StreamClient;

/// Delay between a phase completing and the focus advancing to the next one,
/// so the completed state is visible before the view moves on.
pub const ADVANCE_DELAY: Duration = Duration::from_secs(1);

/// Detects `active → completed` transitions between consecutive phase
/// evaluations.
///
/// This is the one stateful piece of the projector surface: it needs the
/// previous evaluation to diff against, so callers keep one tracker alive for
/// the lifetime of the view.
#[derive(Debug, Default)]
pub struct PhaseTracker {
    previous: Option<[PhaseState; 3]>,
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds the latest phase evaluation. Returns the phase the view should
    /// advance to when a phase just went `active → completed`; when several
    /// did at once, the furthest one along wins.
    pub fn observe(&mut self, current: &[PhaseState; 3]) -> Option<Phase> {
        let previous = self.previous.replace(*current)?;
        for (before, after) in previous.iter().zip(current.iter()).rev() {
            if before.status == PhaseStatus::Active && after.status == PhaseStatus::Completed {
                return after.phase.next();
            }
        }
        None
    }
}

/// Cancellable delayed focus change.
///
/// `schedule` arms a single pending advance; arming again, cancelling, or
/// dropping the owner aborts the previous one, so a phase list that changes
/// within the delay window never applies a stale advance.
pub struct AutoAdvance {
    tx: watch::Sender<Option<Phase>>,
    pending: Option<JoinHandle<()>>,
    delay: Duration,
}

impl AutoAdvance {
    pub fn new() -> (Self, watch::Receiver<Option<Phase>>) {
        Self::with_delay(ADVANCE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> (Self, watch::Receiver<Option<Phase>>) {
        let (tx, rx) = watch::channel(None);
        (
            Self {
                tx,
                pending: None,
                delay,
            },
            rx,
        )
    }

    /// Sets the focused phase immediately, cancelling any pending advance.
    pub fn focus(&mut self, phase: Phase) {
        self.cancel();
        self.tx.send_replace(Some(phase));
    }

    /// Schedules the focus to move to `phase` after the configured delay.
    pub fn schedule(&mut self, phase: Phase) {
        self.cancel();
        debug!(?phase, delay_ms = self.delay.as_millis() as u64, "auto-advance scheduled");
        let tx = self.tx.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send_replace(Some(phase));
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

impl Drop for AutoAdvance {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A running live subscription: the stream task plus a read handle on the
/// store it feeds. Dropping it closes the connection; cancellation is
/// purely "stop listening".
pub struct LiveStatus {
    updates: StoreReader,
    task: JoinHandle<Result<(), StreamError>>,
}

impl LiveStatus {
    /// Opens a live subscription for one application. The spawned stream
    /// client is the store's only writer.
    pub fn connect(
        http: &reqwest::Client,
        config: &Config,
        application_id: Uuid,
    ) -> Result<Self, StreamError> {
        let client = StreamClient::new(
            http.clone(),
            config.api_url.clone(),
            config.api_token.as_deref(),
            application_id,
        )?;
        let store = SnapshotStore::new();
        let updates = store.subscribe();
        let task = tokio::spawn(async move { client.run(&store).await });
        Ok(Self { updates, task })
    }

    /// Latest-value subscription to the store this stream feeds.
    pub fn updates(&self) -> StoreReader {
        self.updates.clone()
    }
}

impl Drop for LiveStatus {
    fn drop(&mut self) {
        self.task.abort();
    }
}
