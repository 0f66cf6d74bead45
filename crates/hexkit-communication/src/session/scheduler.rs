//! One-shot expiry scheduling.
//!
//! The session controller needs exactly one deferred callback at a
//! time: the movement-monitor reset. The trait models that as
//! schedule/cancel over opaque timer ids so tests can drive expiry by
//! hand while the real implementation rides the tokio runtime.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Opaque handle for a scheduled one-shot timer
///
/// Ids are never reused within a scheduler, so a tick from a canceled
/// or superseded timer can be recognized as stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

impl TimerId {
    /// Construct an id from a raw counter value (for schedulers)
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw counter value
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// One-shot timer scheduling used by the session controller
pub trait Scheduler: Send {
    /// Arrange for a tick to fire after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Cancel a pending timer; a no-op if it already fired
    fn cancel(&mut self, id: TimerId);
}

/// Scheduler running on the tokio runtime
///
/// Each schedule spawns a sleep task that delivers its `TimerId` over
/// an mpsc channel; the driving event loop receives ids and feeds them
/// to `SessionController::on_expiry_tick`. Cancel aborts the task.
pub struct TokioScheduler {
    next_id: u64,
    tx: mpsc::UnboundedSender<TimerId>,
    tasks: HashMap<TimerId, JoinHandle<()>>,
}

impl TokioScheduler {
    /// Create a scheduler and the receiver its ticks arrive on
    ///
    /// Must be called within a tokio runtime.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                next_id: 0,
                tx,
                tasks: HashMap::new(),
            },
            rx,
        )
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        // Drop bookkeeping for timers that already fired.
        self.tasks.retain(|_, handle| !handle.is_finished());

        let id = TimerId(self.next_id);
        self.next_id += 1;

        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver gone means the session is shutting down.
            let _ = tx.send(id);
        });
        self.tasks.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.tasks.remove(&id) {
            handle.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
