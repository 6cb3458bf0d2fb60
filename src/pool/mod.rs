//! Worker identities and Idle/Busy status.
//!
//! Workers are added one at a time and removed in reverse order of
//! addition. Display names are cosmetic and supplied by [`WorkerNamer`].

mod naming;
mod workers;

pub use naming::WorkerNamer;
pub use workers::{Worker, WorkerId, WorkerPool, WorkerStatus};
