//! Session-scoped orchestration of long-running optimization jobs.
//!
//! Clients identify themselves with an opaque session id. For each session
//! the crate keeps the best known result (a [`Snapshot`]), runs solving
//! jobs in the background and publishes every improvement while the job
//! is still running:
//!
//! - **[`SnapshotStore`]**: latest snapshot per session, guarded by job
//!   generation so a superseded job can never overwrite a newer one.
//! - **[`JobRegistry`]**: live generation and [`CancelHandle`] per session.
//! - **[`Engine`] / [`Importer`]**: boundaries to the optimization engine
//!   and to whatever builds a session's first problem. [`SaEngine`] plugs
//!   in the bundled Simulated Annealing runner ([`sa`]).
//! - **[`JobExecutor`]**: bounded `rayon` worker pool; submission never
//!   blocks, shutdown waits a bounded grace period.
//! - **[`Orchestrator`]**: the façade tying the above together.
//!
//! # Architecture
//!
//! The orchestrator is generic over the engine and knows nothing about
//! the problem domain. Cancellation is cooperative: engines poll their
//! handle at their own checkpoints. No lock is held while an engine runs.

pub mod config;
pub mod engine;
pub mod error;
pub mod executor;
pub mod generation;
pub mod orchestrator;
pub mod registry;
pub mod sa;
pub mod score;
pub mod snapshot;

#[cfg(test)]
mod testing;

pub use config::{OrchestratorConfig, OverlapPolicy};
pub use engine::{Engine, EngineSnapshot, Importer, SaEngine};
pub use error::{BoxError, SolveError};
pub use executor::JobExecutor;
pub use generation::Generation;
pub use orchestrator::{Ack, Orchestrator};
pub use registry::{CancelHandle, JobRegistry, JobTicket};
pub use score::Score;
pub use snapshot::{Snapshot, SnapshotStore};
