//! Error taxonomy for job orchestration.

use thiserror::Error;

/// Boxed error reported by external collaborators (importers, engines).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the orchestration layer.
#[derive(Error, Debug)]
pub enum SolveError {
    /// Bootstrapping the initial problem failed. The session stays
    /// unbootstrapped, so the call can be retried.
    #[error("failed to import dataset `{dataset}`: {source}")]
    ImportFailure {
        dataset: String,
        #[source]
        source: BoxError,
    },

    /// The optimization run faulted. The session keeps its last good snapshot.
    #[error("engine failed for session `{session}`: {reason}")]
    EngineFailure { session: String, reason: String },

    #[error("session `{0}` has no snapshot yet")]
    NotBootstrapped(String),

    /// Only raised under [`OverlapPolicy::Reject`](crate::config::OverlapPolicy::Reject).
    #[error("session `{0}` already has a running job")]
    JobAlreadyRunning(String),

    #[error("shutdown in progress, new jobs are rejected")]
    ShutdownInProgress,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
