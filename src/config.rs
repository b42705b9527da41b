//! Orchestrator configuration.

use crate::error::SolveError;
use std::time::Duration;

/// What `start_job` does when the session already has a live job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverlapPolicy {
    /// Start a new generation; the older job keeps running but its writes
    /// are dropped.
    #[default]
    Supersede,

    /// Fail with [`SolveError::JobAlreadyRunning`].
    Reject,
}

/// Configuration for the [`Orchestrator`](crate::Orchestrator).
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_solvejob::{OrchestratorConfig, OverlapPolicy};
///
/// let config = OrchestratorConfig::new("belgium-road-time-n50-k10.vrp")
///     .with_workers(2)
///     .with_shutdown_grace(Duration::from_secs(10))
///     .with_overlap(OverlapPolicy::Reject);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrchestratorConfig {
    /// Dataset reference handed to the importer when a session bootstraps.
    pub dataset: String,

    /// Number of worker threads running jobs.
    pub workers: usize,

    /// How long `shutdown` waits for running jobs.
    pub shutdown_grace: Duration,

    pub overlap: OverlapPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            dataset: String::new(),
            workers: 4,
            shutdown_grace: Duration::from_secs(5),
            overlap: OverlapPolicy::default(),
        }
    }
}

impl OrchestratorConfig {
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            ..Self::default()
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SolveError> {
        if self.workers == 0 {
            return Err(SolveError::InvalidConfig("workers must be positive".into()));
        }
        if self.shutdown_grace.is_zero() {
            return Err(SolveError::InvalidConfig(
                "shutdown_grace must be non-zero".into(),
            ));
        }
        Ok(())
    }
}
