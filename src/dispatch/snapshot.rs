//! Read-only views handed to the presentation layer.

use crate::ledger::Completion;
use crate::pool::{WorkerId, WorkerStatus};
use crate::queue::Item;
use crate::schedule::Tick;

/// A worker as seen from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkerView {
    pub id: WorkerId,
    pub name: String,
    pub status: WorkerStatus,
    pub current_item: Option<Item>,
    /// Tick the in-flight item finishes, when busy.
    pub due_at: Option<Tick>,
}

/// Full engine state at one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub now: Tick,
    /// Waiting items in dispatch order.
    pub pending: Vec<Item>,
    /// Finished items in completion order.
    pub completed: Vec<Completion>,
    /// Workers in addition order.
    pub workers: Vec<WorkerView>,
}
