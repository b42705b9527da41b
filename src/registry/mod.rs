//! Job bookkeeping: generations, liveness and cancellation.
//!
//! [`JobRegistry`] issues a fresh [`Generation`](crate::Generation) for
//! every solving attempt and tracks which one is live per session. Each
//! attempt receives a [`CancelHandle`] that the engine polls at its own
//! checkpoints.

mod cancel;
mod jobs;

pub use cancel::CancelHandle;
pub use jobs::{JobRegistry, JobTicket};
