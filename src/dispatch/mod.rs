//! Dispatch engine: matches idle workers to queued items, runs
//! fixed-duration service, and routes completions and evictions.
//!
//! # Worker lifecycle
//!
//! ```text
//! Idle --(assignment pass takes queue head)--> Busy --(service completes)--> Idle
//! Busy --(removed)--> destroyed, item restored to the queue
//! ```
//!
//! An evicted item restarts service from scratch on whichever worker picks
//! it up next.

mod config;
mod engine;
mod snapshot;

pub use config::DispatchConfig;
pub use engine::{Assignment, Dispatcher};
pub use snapshot::{Snapshot, WorkerView};
