//! Immutable result snapshots and the per-session store that publishes them.
//!
//! A [`Snapshot`] is never mutated in place: every improvement produces a
//! new value that replaces the stored one. [`SnapshotStore`] stamps each
//! accepted write with the [`Generation`](crate::Generation) of the job
//! that produced it and drops writes from superseded generations.

mod store;
mod types;

pub use store::SnapshotStore;
pub use types::Snapshot;
