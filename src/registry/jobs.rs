//! Per-session job registry.

use super::cancel::CancelHandle;
use crate::generation::Generation;
use dashmap::DashMap;

/// Identity and cancellation handle of one solving attempt.
#[derive(Debug, Clone)]
pub struct JobTicket {
    generation: Generation,
    cancel: CancelHandle,
}

impl JobTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cancel_handle(&self) -> &CancelHandle {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[derive(Default)]
struct SessionJobs {
    last_issued: Generation,
    live: Option<Generation>,
    // Cancellation of the live job was requested but it has not ended yet.
    terminating: bool,
    // Issued and not yet ended, superseded jobs included.
    running: Vec<JobTicket>,
}

impl SessionJobs {
    fn issue(&mut self, root: &CancelHandle) -> JobTicket {
        self.last_issued = self.last_issued.next();
        let ticket = JobTicket {
            generation: self.last_issued,
            cancel: root.child(),
        };
        self.live = Some(ticket.generation);
        self.terminating = false;
        self.running.push(ticket.clone());
        ticket
    }

    fn ticket(&self, generation: Generation) -> Option<&JobTicket> {
        self.running.iter().find(|t| t.generation == generation)
    }

    /// Cancels the live job unless it is already terminating.
    fn request_cancel(&mut self) -> Option<Generation> {
        let generation = self.live.filter(|_| !self.terminating)?;
        if let Some(ticket) = self.ticket(generation) {
            ticket.cancel.cancel();
        }
        self.terminating = true;
        Some(generation)
    }
}

/// Tracks, per session, the live job generation and its cancellation handle.
///
/// At most one generation per session is live. Starting a new job
/// supersedes the previous one without cancelling it: the older job keeps
/// running, its snapshot writes are rejected by the store and its final
/// [`end`](Self::end) call only forgets its handle.
///
/// A cancelled job stays live, in a terminating state, until it calls
/// [`end`](Self::end). [`try_begin`](Self::try_begin) refuses to start
/// over it.
#[derive(Default)]
pub struct JobRegistry {
    sessions: DashMap<String, SessionJobs>,
    // Parent of every issued handle; cancelled by `close`.
    root: CancelHandle,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new generation for `session` and makes it the live one.
    pub fn begin(&self, session: &str) -> JobTicket {
        let mut jobs = self.sessions.entry(session.to_owned()).or_default();
        if let Some(previous) = jobs.live {
            tracing::info!(
                session,
                superseded = %previous,
                terminating = jobs.terminating,
                "superseding live job"
            );
        }
        jobs.issue(&self.root)
    }

    /// Like [`begin`](Self::begin), but returns `None` while a job is live,
    /// terminating ones included.
    pub fn try_begin(&self, session: &str) -> Option<JobTicket> {
        let mut jobs = self.sessions.entry(session.to_owned()).or_default();
        if jobs.live.is_some() {
            return None;
        }
        Some(jobs.issue(&self.root))
    }

    /// Whether `generation` of `session` has been told to stop.
    ///
    /// Reads the same handle the job polls. A generation that already ended
    /// or was never issued reads as cancelled.
    pub fn is_cancelled(&self, session: &str, generation: Generation) -> bool {
        self.sessions
            .get(session)
            .and_then(|jobs| jobs.ticket(generation).map(JobTicket::is_cancelled))
            .unwrap_or(true)
    }

    /// Signals cancellation to the live job of `session`.
    ///
    /// Returns `false` if no job was live or it was already terminating.
    pub fn cancel(&self, session: &str) -> bool {
        let Some(mut jobs) = self.sessions.get_mut(session) else {
            return false;
        };
        match jobs.request_cancel() {
            Some(generation) => {
                tracing::info!(session, %generation, "job cancellation requested");
                true
            }
            None => false,
        }
    }

    /// Forgets `generation`; clears liveness if it was the live one.
    pub fn end(&self, session: &str, generation: Generation) {
        if let Some(mut jobs) = self.sessions.get_mut(session) {
            jobs.running.retain(|t| t.generation != generation);
            if jobs.live == Some(generation) {
                jobs.live = None;
                jobs.terminating = false;
            }
        }
    }

    /// Cancels every job, superseded ones included.
    ///
    /// Tickets issued afterwards start out cancelled. Returns how many
    /// sessions had a live job that was not already terminating.
    pub fn close(&self) -> usize {
        self.root.cancel();
        let mut cancelled = 0;
        for mut jobs in self.sessions.iter_mut() {
            if jobs.request_cancel().is_some() {
                cancelled += 1;
            }
        }
        cancelled
    }

    pub fn is_closed(&self) -> bool {
        self.root.is_cancelled()
    }

    pub fn live_generation(&self, session: &str) -> Option<Generation> {
        self.sessions.get(session).and_then(|jobs| jobs.live)
    }

    pub fn is_live(&self, session: &str) -> bool {
        self.live_generation(session).is_some()
    }

    /// Whether the live job of `session` was cancelled but has not ended.
    pub fn is_terminating(&self, session: &str) -> bool {
        self.sessions
            .get(session)
            .is_some_and(|jobs| jobs.live.is_some() && jobs.terminating)
    }

    /// Number of sessions with a live job.
    pub fn live_count(&self) -> usize {
        self.sessions
            .iter()
            .filter(|jobs| jobs.live.is_some())
            .count()
    }
}
