//! Single-queue fulfillment engine.
//!
//! Models one queue served by a pool of interchangeable workers:
//!
//! - **Queue**: Two priority classes (`High`, `Normal`) with FIFO order
//!   inside each class. Items interrupted by worker removal return to the
//!   front of their class.
//! - **Pool**: Workers are added and removed in stack order and are either
//!   idle or busy with exactly one item.
//! - **Schedule**: Fixed-duration service modelled as cancellable deferred
//!   completions on a virtual clock.
//! - **Ledger**: Append-only record of finished items.
//! - **Dispatch**: The engine tying these together. Every mutating call
//!   ends with an assignment pass, so idle capacity never coexists with
//!   waiting work.
//!
//! # Architecture
//!
//! Everything runs on the caller's thread. Time only moves when the caller
//! calls [`dispatch::Dispatcher::advance`], which makes every run fully
//! deterministic. Rendering, persistence, and polling cadence belong to the
//! consumer; with the `serde` feature, [`dispatch::Snapshot`] can be
//! serialized directly.

pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod pool;
pub mod queue;
pub mod schedule;

pub use error::{FulfillError, Result};
