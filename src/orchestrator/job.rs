//! State shared between the façade and the worker threads.

use crate::engine::{Engine, EngineSnapshot, Importer};
use crate::error::SolveError;
use crate::generation::Generation;
use crate::registry::{JobRegistry, JobTicket};
use crate::snapshot::{Snapshot, SnapshotStore};
use dashmap::DashMap;
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

pub(crate) struct Shared<E: Engine, I> {
    pub(crate) store: SnapshotStore<E::Problem, E::Solution>,
    pub(crate) registry: JobRegistry,
    engine: E,
    importer: I,
    dataset: String,
    // Per-session gates so each session is imported once. An entry is
    // dropped once its session is in the store.
    bootstrap: DashMap<String, Arc<Mutex<()>>>,
}

impl<E, I> Shared<E, I>
where
    E: Engine,
    I: Importer<E::Problem>,
{
    pub(crate) fn new(engine: E, importer: I, dataset: String) -> Self {
        Self {
            store: SnapshotStore::new(),
            registry: JobRegistry::new(),
            engine,
            importer,
            dataset,
            bootstrap: DashMap::new(),
        }
    }

    /// Returns the current snapshot, importing the problem on first use.
    pub(crate) fn snapshot_or_bootstrap(
        &self,
        session: &str,
    ) -> Result<Arc<EngineSnapshot<E>>, SolveError> {
        if let Ok(snapshot) = self.store.get(session) {
            return Ok(snapshot);
        }

        // Clone the gate out so no map shard stays locked during the import.
        let gate = Arc::clone(
            self.bootstrap
                .entry(session.to_owned())
                .or_default()
                .value(),
        );
        let _bootstrap = gate.lock();
        if let Ok(snapshot) = self.store.get(session) {
            return Ok(snapshot);
        }
        if self.store.is_sealed() {
            return Err(SolveError::ShutdownInProgress);
        }

        let problem = self
            .importer
            .import(&self.dataset)
            .map_err(|source| SolveError::ImportFailure {
                dataset: self.dataset.clone(),
                source,
            })?;

        if !self.store.put(
            session,
            Snapshot::unsolved(Arc::new(problem)),
            Generation::BOOTSTRAP,
        ) {
            return Err(SolveError::ShutdownInProgress);
        }
        self.bootstrap.remove(session);
        tracing::info!(session, dataset = %self.dataset, "session bootstrapped");
        self.store.get(session)
    }

    /// Body of one solving job. Never panics past this frame.
    pub(crate) fn run_job(&self, session: &str, ticket: JobTicket) {
        let generation = ticket.generation();
        let span = tracing::info_span!("job", session, %generation);
        let _enter = span.enter();

        if ticket.is_cancelled() {
            tracing::debug!("job cancelled before it started");
            self.registry.end(session, generation);
            return;
        }

        let start = match self.store.get(session) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(error = %e, "job has no starting snapshot");
                self.registry.end(session, generation);
                return;
            }
        };

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.engine
                .run(&start, ticket.cancel_handle(), &mut |snapshot| {
                    self.store.put(session, snapshot, generation);
                })
        }));

        let failure = match outcome {
            Ok(Ok(best)) => {
                let score = best.score();
                let published = self.store.put(session, best, generation);
                tracing::info!(
                    %score,
                    published,
                    cancelled = ticket.is_cancelled(),
                    "job finished"
                );
                None
            }
            Ok(Err(e)) => Some(e.to_string()),
            Err(payload) => Some(panic_reason(payload.as_ref())),
        };

        if let Some(reason) = failure {
            let error = SolveError::EngineFailure {
                session: session.to_owned(),
                reason,
            };
            tracing::error!(error = %error, "job failed, keeping last good snapshot");
        }

        self.registry.end(session, generation);
    }
}

fn panic_reason(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_owned()
    }
}
