//! Deferred service completions on a virtual clock.
//!
//! Each busy worker has at most one pending completion, kept in a registry
//! keyed by worker id. Completions are started, cancelled, and fired
//! explicitly; nothing runs on its own. The owner drives time forward and
//! pulls due entries with [`ServiceScheduler::pop_due`].
//!
//! # Ordering
//!
//! Due entries fire in `(due, seq)` order, where `seq` is the start order.
//! Two completions due at the same tick fire in the order they were started.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{FulfillError, Result};
use crate::pool::WorkerId;

/// Virtual time unit.
pub type Tick = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingService {
    due: Tick,
    seq: u64,
}

/// Registry of pending per-worker completions plus the simulation clock.
///
/// `by_due` mirrors `pending` as `(due, seq, worker)` so the earliest entry
/// is always first.
#[derive(Debug, Clone, Default)]
pub struct ServiceScheduler {
    now: Tick,
    next_seq: u64,
    pending: BTreeMap<WorkerId, PendingService>,
    by_due: BTreeSet<(Tick, u64, WorkerId)>,
}

impl ServiceScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Registers a completion for `worker`, due `duration` ticks from now.
    ///
    /// Returns the due tick. A worker with a completion already pending is
    /// rejected and its existing entry kept.
    pub fn start(&mut self, worker: WorkerId, duration: Tick) -> Result<Tick> {
        if self.pending.contains_key(&worker) {
            return Err(FulfillError::ServiceAlreadyPending(worker));
        }
        let due = self.now.saturating_add(duration);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.insert(worker, PendingService { due, seq });
        self.by_due.insert((due, seq, worker));
        Ok(due)
    }

    /// Cancels the pending completion for `worker`, if any.
    ///
    /// A cancelled completion never fires. Returns the tick it was due at.
    pub fn cancel(&mut self, worker: WorkerId) -> Option<Tick> {
        let p = self.pending.remove(&worker)?;
        self.by_due.remove(&(p.due, p.seq, worker));
        Some(p.due)
    }

    /// Removes and returns the earliest completion due at or before `until`,
    /// moving the clock to its due tick.
    pub fn pop_due(&mut self, until: Tick) -> Option<(WorkerId, Tick)> {
        let &(due, _, worker) = self.by_due.first().filter(|&&(due, _, _)| due <= until)?;
        self.by_due.pop_first();
        self.pending.remove(&worker);
        self.now = self.now.max(due);
        Some((worker, due))
    }

    /// Moves the clock forward to `tick`. Never moves it backwards.
    pub fn advance_to(&mut self, tick: Tick) {
        self.now = self.now.max(tick);
    }

    /// Tick at which `worker`'s completion is due.
    pub fn due_at(&self, worker: WorkerId) -> Option<Tick> {
        self.pending.get(&worker).map(|p| p.due)
    }

    /// Earliest pending due tick.
    pub fn next_due(&self) -> Option<Tick> {
        self.by_due.first().map(|&(due, _, _)| due)
    }

    pub fn is_pending(&self, worker: WorkerId) -> bool {
        self.pending.contains_key(&worker)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
