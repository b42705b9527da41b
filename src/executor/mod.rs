//! Bounded worker pool for solving jobs.
//!
//! [`JobExecutor`] runs job closures on a fixed number of `rayon` worker
//! threads. Submissions beyond the worker count are queued by the pool,
//! so [`submit`](JobExecutor::submit) never blocks the caller.

mod pool;

pub use pool::JobExecutor;
