//! Test doubles shared by the unit tests.

use crate::engine::Engine;
use crate::error::BoxError;
use crate::registry::CancelHandle;
use crate::sa::SaProblem;
use crate::score::Score;
use crate::snapshot::Snapshot;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Fault {
    Error,
    Panic,
}

#[derive(Default)]
struct EngineStats {
    steps_taken: AtomicUsize,
    finished_runs: AtomicUsize,
}

/// Engine that counts up from the starting solution, one improvement per step.
///
/// The first step of an unsolved start is infeasible (`hard = -1`); every
/// later step is feasible with `soft` equal to the solution value.
#[derive(Clone)]
pub(crate) struct ScriptedEngine {
    steps: u32,
    step_delay: Duration,
    fault: Option<(u32, Fault)>,
    stats: Arc<EngineStats>,
}

impl ScriptedEngine {
    pub(crate) fn new(steps: u32) -> Self {
        Self {
            steps,
            step_delay: Duration::ZERO,
            fault: None,
            stats: Arc::default(),
        }
    }

    pub(crate) fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    /// Returns an error instead of taking step `step`.
    pub(crate) fn failing_at(mut self, step: u32) -> Self {
        self.fault = Some((step, Fault::Error));
        self
    }

    /// Panics instead of taking step `step`.
    pub(crate) fn panicking_at(mut self, step: u32) -> Self {
        self.fault = Some((step, Fault::Panic));
        self
    }

    pub(crate) fn steps_taken(&self) -> usize {
        self.stats.steps_taken.load(Ordering::SeqCst)
    }

    /// Runs that returned, with or without error.
    pub(crate) fn finished_runs(&self) -> usize {
        self.stats.finished_runs.load(Ordering::SeqCst)
    }

    fn steps(
        &self,
        start: &Snapshot<String, u32>,
        cancel: &CancelHandle,
        on_improve: &mut dyn FnMut(Snapshot<String, u32>),
    ) -> Result<Snapshot<String, u32>, BoxError> {
        let base = start.solution().copied().unwrap_or(0);
        let mut best = start.clone();

        for step in 1..=self.steps {
            if cancel.is_cancelled() {
                break;
            }
            if !self.step_delay.is_zero() {
                thread::sleep(self.step_delay);
            }
            match self.fault {
                Some((at, Fault::Error)) if at == step => {
                    return Err("scripted engine fault".into());
                }
                Some((at, Fault::Panic)) if at == step => panic!("scripted engine panic"),
                _ => {}
            }

            let value = base + step;
            let hard = if base == 0 && step == 1 { -1.0 } else { 0.0 };
            best = Snapshot::solved(
                Arc::clone(start.problem()),
                value,
                Score::hard_soft(hard, value as f64),
            );
            self.stats.steps_taken.fetch_add(1, Ordering::SeqCst);
            on_improve(best.clone());
        }
        Ok(best)
    }
}

impl Engine for ScriptedEngine {
    type Problem = String;
    type Solution = u32;

    fn run(
        &self,
        start: &Snapshot<String, u32>,
        cancel: &CancelHandle,
        on_improve: &mut dyn FnMut(Snapshot<String, u32>),
    ) -> Result<Snapshot<String, u32>, BoxError> {
        let result = self.steps(start, cancel, on_improve);
        self.stats.finished_runs.fetch_add(1, Ordering::SeqCst);
        result
    }
}

#[derive(Default)]
struct ImporterState {
    imports: AtomicUsize,
    failing: AtomicBool,
    delay_ms: AtomicU64,
    per_session: bool,
}

/// Importer that returns the dataset name as the problem and counts calls.
#[derive(Clone, Default)]
pub(crate) struct CountingImporter {
    state: Arc<ImporterState>,
}

impl CountingImporter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every import fails until [`recover`](Self::recover) is called.
    pub(crate) fn failing() -> Self {
        let importer = Self::new();
        importer.state.failing.store(true, Ordering::SeqCst);
        importer
    }

    /// Suffixes each problem with its import number, so problems differ.
    pub(crate) fn per_session() -> Self {
        Self {
            state: Arc::new(ImporterState {
                per_session: true,
                ..ImporterState::default()
            }),
        }
    }

    /// Sleeps for `delay` inside every import.
    pub(crate) fn with_import_delay(self, delay: Duration) -> Self {
        self.state
            .delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
        self
    }

    pub(crate) fn recover(&self) {
        self.state.failing.store(false, Ordering::SeqCst);
    }

    pub(crate) fn imports(&self) -> usize {
        self.state.imports.load(Ordering::SeqCst)
    }
}

impl crate::engine::Importer<String> for CountingImporter {
    fn import(&self, dataset: &str) -> Result<String, BoxError> {
        let n = self.state.imports.fetch_add(1, Ordering::SeqCst) + 1;
        let delay = self.state.delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            thread::sleep(Duration::from_millis(delay));
        }
        if self.state.failing.load(Ordering::SeqCst) {
            return Err(format!("dataset `{dataset}` unavailable").into());
        }
        if self.state.per_session {
            Ok(format!("{dataset}#{n}"))
        } else {
            Ok(dataset.to_owned())
        }
    }
}

/// Sort a shuffled permutation; cost is the number of misplaced elements.
pub(crate) struct PermutationProblem {
    n: usize,
}

impl PermutationProblem {
    pub(crate) fn new(n: usize) -> Self {
        Self { n }
    }
}

impl SaProblem for PermutationProblem {
    type Solution = Vec<usize>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Vec<usize> {
        let mut perm: Vec<usize> = (0..self.n).collect();
        perm.shuffle(rng);
        perm
    }

    fn cost(&self, perm: &Vec<usize>) -> f64 {
        perm.iter().enumerate().filter(|&(i, &v)| i != v).count() as f64
    }

    fn neighbor<R: Rng>(&self, perm: &Vec<usize>, rng: &mut R) -> Vec<usize> {
        let mut next = perm.clone();
        let i = rng.random_range(0..self.n);
        let j = rng.random_range(0..self.n);
        next.swap(i, j);
        next
    }
}
