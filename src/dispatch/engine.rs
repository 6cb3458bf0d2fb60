//! Dispatch engine.
//!
//! # Control flow
//!
//! Every mutating entry point (submit, worker add, worker removal, service
//! completion) ends with the assignment pass, so the queue drains as soon
//! as capacity exists. After any public call returns, either no worker is
//! idle or the queue is empty.
//!
//! All state lives in one [`Dispatcher`] value and every call runs to
//! completion before the next begins. Completions only fire from
//! [`Dispatcher::advance`], on the caller's thread.

use std::collections::BTreeMap;

use super::config::DispatchConfig;
use super::snapshot::{Snapshot, WorkerView};
use crate::error::Result;
use crate::ledger::{Completion, CompletionLedger};
use crate::pool::{WorkerId, WorkerNamer, WorkerPool};
use crate::queue::{Item, ItemId, OrderQueue, Priority};
use crate::schedule::{ServiceScheduler, Tick};

/// The item a busy worker is servicing. Owning record of in-flight work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub item: Item,
    pub started_at: Tick,
}

/// Matches queued items to idle workers and runs fixed-duration service.
///
/// # Examples
///
/// ```
/// use u_fulfill::dispatch::Dispatcher;
/// use u_fulfill::queue::Priority;
///
/// let mut engine = Dispatcher::default();
/// engine.submit(Priority::Normal);
/// engine.submit(Priority::High);
/// engine.add_worker();
///
/// // The high-priority item went straight to the new worker.
/// assert_eq!(engine.pending().len(), 1);
///
/// engine.advance(10);
/// assert_eq!(engine.completed().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    config: DispatchConfig,
    queue: OrderQueue,
    pool: WorkerPool,
    namer: WorkerNamer,
    scheduler: ServiceScheduler,
    ledger: CompletionLedger,
    assignments: BTreeMap<WorkerId, Assignment>,
    next_item_id: ItemId,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::build(DispatchConfig::default())
    }
}

impl Dispatcher {
    /// Creates an engine after validating `config`.
    pub fn new(config: DispatchConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: DispatchConfig) -> Self {
        let namer = WorkerNamer::new(config.worker_names.clone(), config.seed);
        Self {
            config,
            queue: OrderQueue::new(),
            pool: WorkerPool::new(),
            namer,
            scheduler: ServiceScheduler::new(),
            ledger: CompletionLedger::new(),
            assignments: BTreeMap::new(),
            next_item_id: 1,
        }
    }

    /// Returns the engine to its freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::build(self.config.clone());
        tracing::info!("Dispatcher reset");
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    // ---- Mutating operations ----

    /// Queues a new item and returns its id.
    pub fn submit(&mut self, priority: Priority) -> ItemId {
        let item = Item::new(self.next_item_id, priority);
        self.next_item_id += 1;
        self.queue.insert(item);
        tracing::debug!(item_id = item.id, priority = %priority, "Item submitted");

        self.assign_pending();
        item.id
    }

    /// Adds an idle worker and returns its id.
    pub fn add_worker(&mut self) -> WorkerId {
        let name = self.namer.next_name();
        let worker_id = self.pool.add(name);
        tracing::info!(worker_id, "Worker added");

        self.assign_pending();
        worker_id
    }

    /// Removes the most recently added worker and returns its id.
    ///
    /// A busy worker's pending completion is cancelled and its item is
    /// restored to the front of its class. Returns `None`, changing
    /// nothing, when the pool is empty.
    pub fn remove_worker(&mut self) -> Option<WorkerId> {
        let (worker_id, busy) = self.pool.last().map(|w| (w.id, w.is_busy()))?;

        if busy {
            self.scheduler.cancel(worker_id);
            if let Some(assignment) = self.assignments.remove(&worker_id) {
                tracing::info!(
                    worker_id,
                    item_id = assignment.item.id,
                    priority = %assignment.item.priority,
                    "Item evicted from removed worker"
                );
                self.queue.restore(assignment.item);
            }
        }
        self.pool.remove();
        tracing::info!(worker_id, "Worker removed");

        self.assign_pending();
        Some(worker_id)
    }

    /// Moves the clock forward by `dt`, firing every completion that falls
    /// due within the window. Returns the number of completions fired.
    ///
    /// Each completion observes its exact due tick, and work it frees up is
    /// dispatched before later completions fire.
    pub fn advance(&mut self, dt: Tick) -> usize {
        let until = self.scheduler.now().saturating_add(dt);
        let mut fired = 0;
        while let Some((worker_id, _)) = self.scheduler.pop_due(until) {
            self.complete_service(worker_id);
            fired += 1;
        }
        self.scheduler.advance_to(until);
        fired
    }

    /// Advances until no completion is pending. Returns completions fired.
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.scheduler.next_due() {
            fired += self.advance(due - self.scheduler.now());
        }
        fired
    }

    // ---- Internal passes ----

    /// Pairs idle workers, in addition order, with queue heads until one
    /// side runs out. Each worker takes at most one item.
    fn assign_pending(&mut self) {
        for worker_id in self.pool.idle_ids() {
            let Some(item) = self.queue.dequeue_front() else {
                break;
            };

            let due = match self.scheduler.start(worker_id, self.config.service_duration) {
                Ok(due) => due,
                Err(e) => {
                    tracing::warn!(worker_id, error = %e, "Service start rejected");
                    self.queue.restore(item);
                    continue;
                }
            };

            if let Some(worker) = self.pool.get_mut(worker_id) {
                worker.mark_busy(item.id);
            }
            let started_at = self.scheduler.now();
            self.assignments
                .insert(worker_id, Assignment { item, started_at });
            tracing::debug!(worker_id, item_id = item.id, started_at, due, "Item assigned");
        }
    }

    fn complete_service(&mut self, worker_id: WorkerId) {
        if self.pool.get(worker_id).is_none() {
            tracing::warn!(worker_id, "Completion fired for removed worker");
            return;
        }

        let completed_at = self.scheduler.now();
        if let Some(assignment) = self.assignments.remove(&worker_id) {
            self.ledger.append(Completion {
                item: assignment.item,
                worker: worker_id,
                started_at: assignment.started_at,
                completed_at,
            });
            tracing::debug!(worker_id, item_id = assignment.item.id, completed_at, "Item completed");
        }
        if let Some(worker) = self.pool.get_mut(worker_id) {
            worker.mark_idle();
        }

        self.assign_pending();
    }

    // ---- Observable state ----

    pub fn now(&self) -> Tick {
        self.scheduler.now()
    }

    /// Waiting items in dispatch order.
    pub fn pending(&self) -> Vec<Item> {
        self.queue.to_vec()
    }

    pub fn queue(&self) -> &OrderQueue {
        &self.queue
    }

    pub fn completed(&self) -> &CompletionLedger {
        &self.ledger
    }

    pub fn pool(&self) -> &WorkerPool {
        &self.pool
    }

    /// What `worker_id` is servicing, if busy.
    pub fn assignment(&self, worker_id: WorkerId) -> Option<&Assignment> {
        self.assignments.get(&worker_id)
    }

    /// Number of completions waiting to fire.
    pub fn in_flight(&self) -> usize {
        self.scheduler.len()
    }

    /// Workers in addition order.
    pub fn workers(&self) -> Vec<WorkerView> {
        self.pool
            .iter()
            .map(|w| WorkerView {
                id: w.id,
                name: w.name.clone(),
                status: w.status(),
                current_item: self.assignments.get(&w.id).map(|a| a.item),
                due_at: self.scheduler.due_at(w.id),
            })
            .collect()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            now: self.now(),
            pending: self.pending(),
            completed: self.ledger.as_slice().to_vec(),
            workers: self.workers(),
        }
    }
}
