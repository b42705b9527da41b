//! SA configuration and cooling schedules.

use crate::error::SolveError;
use std::time::Duration;

/// Cooling schedule for temperature reduction.
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling: `T_k = T_0 - k * (T_0 - T_min) / max_steps`.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// One iteration per temperature step.
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Configuration for the Simulated Annealing engine.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_solvejob::sa::{SaConfig, CoolingSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.001)
///     .with_cooling(CoolingSchedule::Geometric { alpha: 0.98 })
///     .with_iterations_per_temperature(200)
///     .with_time_limit(Duration::from_secs(120));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Minimum temperature. The run stops when T drops below this.
    pub min_temperature: f64,

    pub cooling: CoolingSchedule,

    /// Number of iterations at each temperature level.
    ///
    /// For `LundyMees`, this is ignored (1 iteration per temperature).
    pub iterations_per_temperature: usize,

    /// Maximum total iterations (hard budget). 0 = no limit.
    pub max_iterations: usize,

    /// Wall-clock budget for one run. `None` = no limit.
    pub time_limit: Option<Duration>,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 100,
            max_iterations: 0,
            time_limit: None,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling(mut self, cooling: CoolingSchedule) -> Self {
        self.cooling = cooling;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), SolveError> {
        let invalid = |msg: String| Err(SolveError::InvalidConfig(msg));
        if self.initial_temperature <= 0.0 {
            return invalid("initial_temperature must be positive".into());
        }
        if self.min_temperature <= 0.0 {
            return invalid("min_temperature must be positive".into());
        }
        if self.min_temperature >= self.initial_temperature {
            return invalid("min_temperature must be less than initial_temperature".into());
        }
        if self.time_limit.is_some_and(|limit| limit.is_zero()) {
            return invalid("time_limit must be non-zero".into());
        }
        match self.cooling {
            CoolingSchedule::Geometric { alpha } => {
                if alpha <= 0.0 || alpha >= 1.0 {
                    return invalid(format!("geometric alpha must be in (0, 1), got {alpha}"));
                }
            }
            CoolingSchedule::LundyMees { beta } => {
                if beta <= 0.0 {
                    return invalid(format!("lundy-mees beta must be positive, got {beta}"));
                }
            }
            CoolingSchedule::Linear => {}
        }
        Ok(())
    }
}
