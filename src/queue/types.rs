//! Work items and their priority classes.

/// Unique, monotonically increasing item identifier. Never reused.
pub type ItemId = u64;

/// Priority class of an item.
///
/// Priority only affects queue order; every item takes the same service time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Priority {
    /// Served before any `Normal` item.
    High,
    Normal,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::High => write!(f, "high"),
            Priority::Normal => write!(f, "normal"),
        }
    }
}

/// A unit of work. Immutable once created; only its location changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub priority: Priority,
}

impl Item {
    pub fn new(id: ItemId, priority: Priority) -> Self {
        Self { id, priority }
    }

    pub fn is_high(&self) -> bool {
        self.priority == Priority::High
    }
}
