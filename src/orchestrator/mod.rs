//! Session-scoped job orchestration.
//!
//! The [`Orchestrator`] owns one [`SnapshotStore`](crate::SnapshotStore),
//! one [`JobRegistry`](crate::JobRegistry) and one
//! [`JobExecutor`](crate::JobExecutor). Reads and terminations go straight
//! to the store and the registry; only `start_job` touches the pool.

mod ack;
mod facade;
mod job;

pub use ack::Ack;
pub use facade::Orchestrator;
