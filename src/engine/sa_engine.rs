//! Simulated Annealing behind the [`Engine`] contract.

use super::Engine;
use crate::error::{BoxError, SolveError};
use crate::registry::CancelHandle;
use crate::sa::{SaConfig, SaProblem, SaRunner};
use crate::snapshot::Snapshot;
use std::marker::PhantomData;
use std::sync::Arc;

/// Runs [`SaRunner`] for a session, resuming from the session's current
/// solution when it has one.
pub struct SaEngine<P> {
    config: SaConfig,
    _problem: PhantomData<fn() -> P>,
}

impl<P> SaEngine<P> {
    pub fn new(config: SaConfig) -> Result<Self, SolveError> {
        config.validate()?;
        Ok(Self {
            config,
            _problem: PhantomData,
        })
    }

    pub fn config(&self) -> &SaConfig {
        &self.config
    }
}

impl<P> Engine for SaEngine<P>
where
    P: SaProblem + 'static,
    P::Solution: Sync + 'static,
{
    type Problem = P;
    type Solution = P::Solution;

    fn run(
        &self,
        start: &Snapshot<P, P::Solution>,
        cancel: &CancelHandle,
        on_improve: &mut dyn FnMut(Snapshot<P, P::Solution>),
    ) -> Result<Snapshot<P, P::Solution>, BoxError> {
        let problem = start.problem();
        let result = SaRunner::run_observed(
            problem.as_ref(),
            &self.config,
            start.solution().cloned(),
            Some(cancel),
            |best, _cost| {
                let score = problem.score(best);
                on_improve(Snapshot::solved(Arc::clone(problem), best.clone(), score));
            },
        )?;

        let score = problem.score(&result.best);
        Ok(Snapshot::solved(Arc::clone(problem), result.best, score))
    }
}
