//! Dispatcher configuration.

use crate::error::{FulfillError, Result};
use crate::schedule::Tick;

const DEFAULT_ROSTER: [&str; 8] = [
    "Atlas", "Bolt", "Cog", "Dynamo", "Ember", "Flux", "Gizmo", "Hopper",
];

/// Configuration for a [`Dispatcher`](super::Dispatcher).
///
/// # Examples
///
/// ```
/// use u_fulfill::dispatch::DispatchConfig;
///
/// let config = DispatchConfig::default()
///     .with_service_duration(25)
///     .with_seed(7);
/// assert_eq!(config.service_duration, 25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchConfig {
    /// Ticks every item occupies its worker, regardless of priority.
    pub service_duration: Tick,

    /// Labels drawn for new workers. Empty falls back to "Worker".
    pub worker_names: Vec<String>,

    /// Seed for the worker-name draw (None for random).
    pub seed: Option<u64>,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            service_duration: 10,
            worker_names: DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
            seed: None,
        }
    }
}

impl DispatchConfig {
    /// Sets the fixed service duration.
    pub fn with_service_duration(mut self, ticks: Tick) -> Self {
        self.service_duration = ticks;
        self
    }

    /// Replaces the worker-name roster.
    pub fn with_worker_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.worker_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.service_duration == 0 {
            return Err(FulfillError::ZeroServiceDuration);
        }
        Ok(())
    }
}
