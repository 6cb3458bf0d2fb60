//! Two-class priority queue with FIFO-within-class ordering.
//!
//! `High` items always precede `Normal` items. Within a class, items keep
//! their arrival order, except that an item restored after eviction moves
//! to the front of its class.

mod order;
mod types;

pub use order::OrderQueue;
pub use types::{Item, ItemId, Priority};
