//! Snapshot value type.

use crate::score::Score;
use std::sync::Arc;

/// Best result known for a session at a point in time.
///
/// The problem is shared by every snapshot of a session; the solution is
/// `None` until an engine has produced one.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot<P, S> {
    problem: Arc<P>,
    solution: Option<S>,
    score: Score,
}

impl<P, S> Snapshot<P, S> {
    /// Creates the unsolved snapshot of a freshly imported problem.
    pub fn unsolved(problem: Arc<P>) -> Self {
        Self {
            problem,
            solution: None,
            score: Score::Unscored,
        }
    }

    /// Creates a snapshot holding a solution for `problem`.
    pub fn solved(problem: Arc<P>, solution: S, score: Score) -> Self {
        Self {
            problem,
            solution: Some(solution),
            score,
        }
    }

    pub fn problem(&self) -> &Arc<P> {
        &self.problem
    }

    pub fn solution(&self) -> Option<&S> {
        self.solution.as_ref()
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }
}

impl<P, S: Clone> Clone for Snapshot<P, S> {
    fn clone(&self) -> Self {
        Self {
            problem: Arc::clone(&self.problem),
            solution: self.solution.clone(),
            score: self.score,
        }
    }
}
