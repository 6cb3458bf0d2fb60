//! Append-only record of finished items.

use crate::pool::WorkerId;
use crate::queue::{Item, Priority};
use crate::schedule::Tick;

/// One finished item and the service that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Completion {
    pub item: Item,
    pub worker: WorkerId,
    pub started_at: Tick,
    pub completed_at: Tick,
}

/// Completed items in completion order.
#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    entries: Vec<Completion>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, completion: Completion) {
        self.entries.push(completion);
    }

    /// Completed items, oldest first.
    pub fn items(&self) -> impl Iterator<Item = Item> + '_ {
        self.entries.iter().map(|c| c.item)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Completion> + '_ {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Completion] {
        &self.entries
    }

    pub fn last(&self) -> Option<&Completion> {
        self.entries.last()
    }

    pub fn count_of(&self, priority: Priority) -> usize {
        self.entries
            .iter()
            .filter(|c| c.item.priority == priority)
            .count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
