//! Two-class ordered queue.
//!
//! # Ordering
//!
//! The queue is kept as two class partitions merged logically: every
//! `High` item precedes every `Normal` item, and within a partition items
//! keep arrival order. Ordinary arrivals join the back of their partition.
//! Items restored after an eviction join the *front* of their partition,
//! so a preempted item becomes the most senior of its class.
//!
//! Each operation is a constant-time deque operation on one partition.

use std::collections::VecDeque;

use super::types::{Item, ItemId, Priority};

/// Pending items in dispatch order.
#[derive(Debug, Clone, Default)]
pub struct OrderQueue {
    high: VecDeque<Item>,
    normal: VecDeque<Item>,
}

impl OrderQueue {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a newly arrived item.
    ///
    /// `High` lands right after the last waiting `High` item (ahead of all
    /// `Normal` items); `Normal` lands at the tail.
    pub fn insert(&mut self, item: Item) {
        self.partition_mut(item.priority).push_back(item);
    }

    /// Re-inserts an item whose service was interrupted.
    ///
    /// `High` goes to the very front of the queue. `Normal` goes right
    /// before the first waiting `Normal` item, behind every `High` item.
    pub fn restore(&mut self, item: Item) {
        self.partition_mut(item.priority).push_front(item);
    }

    /// Removes and returns the first item, or `None` when empty.
    pub fn dequeue_front(&mut self) -> Option<Item> {
        self.high.pop_front().or_else(|| self.normal.pop_front())
    }

    /// Returns the first item without removing it.
    pub fn front(&self) -> Option<&Item> {
        self.high.front().or_else(|| self.normal.front())
    }

    /// Iterates in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.high.iter().chain(self.normal.iter())
    }

    /// Copies the queue contents in dispatch order.
    pub fn to_vec(&self) -> Vec<Item> {
        self.iter().copied().collect()
    }

    /// Zero-based dispatch position of an item, if queued.
    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.iter().position(|item| item.id == id)
    }

    /// Number of waiting items of the given class.
    pub fn count_of(&self, priority: Priority) -> usize {
        match priority {
            Priority::High => self.high.len(),
            Priority::Normal => self.normal.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.normal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.normal.is_empty()
    }

    pub fn clear(&mut self) {
        self.high.clear();
        self.normal.clear();
    }

    fn partition_mut(&mut self, priority: Priority) -> &mut VecDeque<Item> {
        match priority {
            Priority::High => &mut self.high,
            Priority::Normal => &mut self.normal,
        }
    }
}
