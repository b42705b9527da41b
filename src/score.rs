//! Quality measure attached to every snapshot.

use std::cmp::Ordering;
use std::fmt;

/// Quality of a snapshot. Higher is better.
///
/// A scored value carries a hard part (constraint violations, `0` when
/// feasible) and a soft part (objective, e.g. negated distance). Scores
/// compare lexicographically: hard first, then soft. [`Score::Unscored`]
/// ranks below every evaluated score.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Score {
    /// Not evaluated yet (freshly imported problem).
    #[default]
    Unscored,

    /// Evaluated hard/soft pair.
    HardSoft {
        /// Negated constraint violation; `0.0` means feasible.
        hard: f64,
        /// Objective value; higher is better.
        soft: f64,
    },
}

impl Score {
    pub fn hard_soft(hard: f64, soft: f64) -> Self {
        Score::HardSoft { hard, soft }
    }

    /// Maps a minimization cost onto a feasible score (`soft = -cost`).
    pub fn of_cost(cost: f64) -> Self {
        Score::HardSoft {
            hard: 0.0,
            soft: -cost,
        }
    }

    pub fn is_scored(&self) -> bool {
        matches!(self, Score::HardSoft { .. })
    }

    /// Returns `true` if the score is evaluated and no hard constraint is broken.
    pub fn is_feasible(&self) -> bool {
        match self {
            Score::Unscored => false,
            Score::HardSoft { hard, .. } => *hard >= 0.0,
        }
    }
}

impl PartialEq for Score {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Score {}

impl PartialOrd for Score {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Score {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Score::Unscored, Score::Unscored) => Ordering::Equal,
            (Score::Unscored, Score::HardSoft { .. }) => Ordering::Less,
            (Score::HardSoft { .. }, Score::Unscored) => Ordering::Greater,
            (
                Score::HardSoft { hard: h1, soft: s1 },
                Score::HardSoft { hard: h2, soft: s2 },
            ) => h1.total_cmp(h2).then_with(|| s1.total_cmp(s2)),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Unscored => f.write_str("unscored"),
            Score::HardSoft { hard, soft } => write!(f, "{hard}hard/{soft}soft"),
        }
    }
}
