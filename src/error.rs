//! Error type shared across the crate.

use thiserror::Error;

use crate::pool::WorkerId;

/// Failures surfaced by configuration and the service scheduler.
///
/// Dispatcher operations themselves never fail; scheduler rejections are
/// absorbed and logged inside the assignment pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FulfillError {
    #[error("service_duration must be positive")]
    ZeroServiceDuration,

    #[error("worker {0} already has a pending service completion")]
    ServiceAlreadyPending(WorkerId),
}

pub type Result<T> = std::result::Result<T, FulfillError>;
