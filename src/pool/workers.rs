//! Worker records and the stack-ordered pool.

use crate::queue::ItemId;

/// Unique, monotonically increasing worker identifier.
pub type WorkerId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WorkerStatus {
    Idle,
    Busy,
}

impl std::fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkerStatus::Idle => write!(f, "idle"),
            WorkerStatus::Busy => write!(f, "busy"),
        }
    }
}

/// A worker that services one item at a time.
///
/// `current_item` is a non-owning reference; the dispatcher's assignment
/// map is the owning record of what each worker is doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Worker {
    pub id: WorkerId,
    /// Display label. Never consulted by dispatch.
    pub name: String,
    status: WorkerStatus,
    current_item: Option<ItemId>,
}

impl Worker {
    pub fn new(id: WorkerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            status: WorkerStatus::Idle,
            current_item: None,
        }
    }

    pub fn status(&self) -> WorkerStatus {
        self.status
    }

    pub fn current_item(&self) -> Option<ItemId> {
        self.current_item
    }

    pub fn is_idle(&self) -> bool {
        self.status == WorkerStatus::Idle
    }

    pub fn is_busy(&self) -> bool {
        self.status == WorkerStatus::Busy
    }

    pub(crate) fn mark_busy(&mut self, item: ItemId) {
        self.status = WorkerStatus::Busy;
        self.current_item = Some(item);
    }

    pub(crate) fn mark_idle(&mut self) {
        self.status = WorkerStatus::Idle;
        self.current_item = None;
    }
}

/// Workers in addition order.
///
/// Removal always takes the most recently added worker. The pool never
/// removes a specific worker by id.
#[derive(Debug, Clone)]
pub struct WorkerPool {
    workers: Vec<Worker>,
    next_id: WorkerId,
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkerPool {
    pub fn new() -> Self {
        Self {
            workers: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds an idle worker with a fresh id and returns that id.
    pub fn add(&mut self, name: impl Into<String>) -> WorkerId {
        let id = self.next_id;
        self.next_id += 1;
        self.workers.push(Worker::new(id, name));
        id
    }

    /// The worker [`remove`](Self::remove) would take next.
    pub fn last(&self) -> Option<&Worker> {
        self.workers.last()
    }

    /// Drops the most recently added worker record.
    ///
    /// Only deletes the record. Callers must settle a busy worker's
    /// in-flight item first.
    pub fn remove(&mut self) -> Option<Worker> {
        self.workers.pop()
    }

    pub fn get(&self, id: WorkerId) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn get_mut(&mut self, id: WorkerId) -> Option<&mut Worker> {
        self.workers.iter_mut().find(|w| w.id == id)
    }

    /// Idle worker ids in addition order.
    pub fn idle_ids(&self) -> Vec<WorkerId> {
        self.workers
            .iter()
            .filter(|w| w.is_idle())
            .map(|w| w.id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Worker> + '_ {
        self.workers.iter()
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    pub fn idle_count(&self) -> usize {
        self.workers.iter().filter(|w| w.is_idle()).count()
    }

    pub fn busy_count(&self) -> usize {
        self.workers.len() - self.idle_count()
    }
}
