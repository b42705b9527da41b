//! Worker pool with graceful, time-bounded shutdown.

use crate::error::SolveError;
use parking_lot::{Condvar, Mutex};
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Counts tasks that were submitted but have not finished yet.
#[derive(Default)]
struct InFlight {
    count: Mutex<usize>,
    idle: Condvar,
}

impl InFlight {
    fn enter(&self) {
        *self.count.lock() += 1;
    }

    fn leave(&self) {
        let mut count = self.count.lock();
        *count -= 1;
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    fn current(&self) -> usize {
        *self.count.lock()
    }

    /// Waits until no task is in flight or `grace` has elapsed.
    fn wait_idle(&self, grace: Duration) -> bool {
        let deadline = Instant::now() + grace;
        let mut count = self.count.lock();
        while *count > 0 {
            if self.idle.wait_until(&mut count, deadline).timed_out() {
                return *count == 0;
            }
        }
        true
    }
}

/// Decrements the in-flight counter even if the task panics.
struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.leave();
    }
}

/// Fixed-size pool that runs submitted tasks concurrently.
///
/// Tasks are expected to observe their own cancellation handles;
/// [`shutdown`](Self::shutdown) only stops intake and waits.
pub struct JobExecutor {
    pool: Mutex<Option<ThreadPool>>,
    accepting: AtomicBool,
    in_flight: Arc<InFlight>,
    workers: usize,
}

impl JobExecutor {
    /// Creates a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self, SolveError> {
        if workers == 0 {
            return Err(SolveError::InvalidConfig(
                "worker count must be positive".into(),
            ));
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("solvejob-worker-{index}"))
            .panic_handler(|_| tracing::error!("job panicked on worker thread"))
            .build()
            .map_err(|e| SolveError::InvalidConfig(format!("failed to build worker pool: {e}")))?;

        tracing::debug!(workers, "job executor started");

        Ok(Self {
            pool: Mutex::new(Some(pool)),
            accepting: AtomicBool::new(true),
            in_flight: Arc::new(InFlight::default()),
            workers,
        })
    }

    /// Queues `task` for execution and returns immediately.
    pub fn submit<F>(&self, task: F) -> Result<(), SolveError>
    where
        F: FnOnce() + Send + 'static,
    {
        let pool = self.pool.lock();
        let Some(pool) = pool.as_ref() else {
            return Err(SolveError::ShutdownInProgress);
        };
        if !self.accepting.load(Ordering::Acquire) {
            return Err(SolveError::ShutdownInProgress);
        }

        self.in_flight.enter();
        let guard = InFlightGuard(Arc::clone(&self.in_flight));
        pool.spawn(move || {
            let _guard = guard;
            task();
        });
        Ok(())
    }

    /// Stops accepting tasks and waits up to `grace` for in-flight ones.
    ///
    /// Returns `true` if every task finished in time. Tasks still running
    /// after `grace` are abandoned: they keep their thread until they return,
    /// but the pool is released.
    pub fn shutdown(&self, grace: Duration) -> bool {
        {
            let _pool = self.pool.lock();
            self.accepting.store(false, Ordering::Release);
        }

        let drained = self.in_flight.wait_idle(grace);
        if drained {
            tracing::info!("job executor drained");
        } else {
            tracing::warn!(
                abandoned = self.in_flight.current(),
                grace_ms = grace.as_millis() as u64,
                "grace period elapsed with jobs still running"
            );
        }

        self.pool.lock().take();
        drained
    }

    pub fn is_accepting(&self) -> bool {
        self.accepting.load(Ordering::Acquire)
    }

    /// Tasks submitted but not yet finished, queued ones included.
    pub fn in_flight(&self) -> usize {
        self.in_flight.current()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}
