//! Boundaries to the external collaborators: the optimization engine and
//! the problem importer.
//!
//! The orchestration layer never looks inside a problem or a solution. It
//! only needs an [`Importer`] to build the first problem of a session and
//! an [`Engine`] that turns a starting snapshot into a stream of improving
//! snapshots while polling a [`CancelHandle`].

mod importer;
mod sa_engine;

pub use importer::Importer;
pub use sa_engine::SaEngine;

use crate::error::BoxError;
use crate::registry::CancelHandle;
use crate::snapshot::Snapshot;

/// Snapshot type produced by engine `E`.
pub type EngineSnapshot<E> = Snapshot<<E as Engine>::Problem, <E as Engine>::Solution>;

/// Calling contract of an optimization engine.
pub trait Engine: Send + Sync + 'static {
    /// Immutable problem input, shared by every snapshot of a session.
    type Problem: Send + Sync + 'static;

    /// Solution state the engine works on.
    type Solution: Clone + Send + Sync + 'static;

    /// Runs until the engine's own limits are reached or `cancel` is observed.
    ///
    /// `on_improve` is called zero or more times, in improving order, with
    /// snapshots of the same problem as `start`. The returned snapshot is
    /// the best one found. After a fault the engine must return `Err` and
    /// must not call `on_improve` again.
    fn run(
        &self,
        start: &Snapshot<Self::Problem, Self::Solution>,
        cancel: &CancelHandle,
        on_improve: &mut dyn FnMut(Snapshot<Self::Problem, Self::Solution>),
    ) -> Result<Snapshot<Self::Problem, Self::Solution>, BoxError>;
}
