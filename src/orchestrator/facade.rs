//! The orchestrator façade.

use super::ack::Ack;
use super::job::Shared;
use crate::config::{OrchestratorConfig, OverlapPolicy};
use crate::engine::{Engine, EngineSnapshot, Importer};
use crate::error::SolveError;
use crate::executor::JobExecutor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Starts, serves and stops optimization jobs per session.
///
/// Built explicitly with [`start`](Self::start) and torn down with
/// [`shutdown`](Self::shutdown). Dropping an orchestrator that was not
/// shut down cancels its jobs and seals the store without waiting.
///
/// # Examples
///
/// ```no_run
/// use rand::Rng;
/// use u_solvejob::sa::{SaConfig, SaProblem};
/// use u_solvejob::{Orchestrator, OrchestratorConfig, SaEngine};
///
/// struct Sphere;
///
/// impl SaProblem for Sphere {
///     type Solution = f64;
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> f64 {
///         rng.random_range(-10.0..10.0)
///     }
///     fn cost(&self, x: &f64) -> f64 {
///         x * x
///     }
///     fn neighbor<R: Rng>(&self, x: &f64, rng: &mut R) -> f64 {
///         x + rng.random_range(-1.0..1.0)
///     }
/// }
///
/// let engine = SaEngine::<Sphere>::new(SaConfig::default())?;
/// let importer = |_: &str| -> Result<Sphere, std::io::Error> { Ok(Sphere) };
/// let orchestrator = Orchestrator::start(OrchestratorConfig::new("sphere"), engine, importer)?;
///
/// orchestrator.start_job("s1")?;
/// println!("{}", orchestrator.snapshot("s1")?.score());
/// orchestrator.terminate("s1");
/// orchestrator.shutdown();
/// # Ok::<(), u_solvejob::SolveError>(())
/// ```
pub struct Orchestrator<E: Engine, I> {
    shared: Arc<Shared<E, I>>,
    executor: JobExecutor,
    config: OrchestratorConfig,
    stopped: AtomicBool,
}

impl<E, I> Orchestrator<E, I>
where
    E: Engine,
    I: Importer<E::Problem>,
{
    /// Validates `config` and spins up the worker pool.
    pub fn start(config: OrchestratorConfig, engine: E, importer: I) -> Result<Self, SolveError> {
        config.validate()?;
        let executor = JobExecutor::new(config.workers)?;
        tracing::info!(
            workers = config.workers,
            dataset = %config.dataset,
            overlap = ?config.overlap,
            "orchestrator started"
        );
        Ok(Self {
            shared: Arc::new(Shared::new(engine, importer, config.dataset.clone())),
            executor,
            config,
            stopped: AtomicBool::new(false),
        })
    }

    /// Current snapshot of `session`, bootstrapping it on first call.
    pub fn snapshot(&self, session: &str) -> Result<Arc<EngineSnapshot<E>>, SolveError> {
        self.shared.snapshot_or_bootstrap(session)
    }

    /// Submits a solving job for `session` and returns without waiting.
    pub fn start_job(&self, session: &str) -> Result<Ack, SolveError> {
        if self.stopped.load(Ordering::Acquire) {
            return Err(SolveError::ShutdownInProgress);
        }
        self.shared.snapshot_or_bootstrap(session)?;

        let registry = &self.shared.registry;
        let ticket = match self.config.overlap {
            OverlapPolicy::Supersede => registry.begin(session),
            OverlapPolicy::Reject => registry
                .try_begin(session)
                .ok_or_else(|| SolveError::JobAlreadyRunning(session.to_owned()))?,
        };
        let generation = ticket.generation();

        let shared = Arc::clone(&self.shared);
        let owned_session = session.to_owned();
        if let Err(e) = self
            .executor
            .submit(move || shared.run_job(&owned_session, ticket))
        {
            registry.end(session, generation);
            return Err(e);
        }

        tracing::info!(session, %generation, "solving started");
        Ok(Ack::SolvingStarted)
    }

    /// Asks the live job of `session` to stop early.
    pub fn terminate(&self, session: &str) -> Ack {
        if self.shared.registry.cancel(session) {
            Ack::Terminating
        } else {
            Ack::AlreadyTerminated
        }
    }

    /// Whether `session` has a live job, including one that is terminating.
    pub fn is_solving(&self, session: &str) -> bool {
        self.shared.registry.is_live(session)
    }

    /// Cancels every job, waits up to the configured grace period and seals
    /// the snapshot store.
    ///
    /// Once this returns no job write becomes visible, even from jobs that
    /// outlived the grace period. Returns `true` if every job finished in
    /// time. Later calls do nothing and return `true`.
    pub fn shutdown(&self) -> bool {
        if self.stopped.swap(true, Ordering::AcqRel) {
            return true;
        }

        let cancelled = self.shared.registry.close();
        tracing::info!(cancelled, "orchestrator shutting down");

        let drained = self.executor.shutdown(self.config.shutdown_grace);
        self.shared.store.seal();

        tracing::info!(drained, "orchestrator stopped");
        drained
    }

    pub fn is_shut_down(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }
}

impl<E: Engine, I> Drop for Orchestrator<E, I> {
    fn drop(&mut self) {
        if !self.stopped.swap(true, Ordering::AcqRel) {
            self.shared.registry.close();
            self.shared.store.seal();
        }
    }
}
