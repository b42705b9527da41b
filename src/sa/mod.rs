//! Simulated Annealing (SA), the bundled optimization engine.
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! The runner reports every new best solution as it is found, polls a
//! [`CancelHandle`](crate::registry::CancelHandle) once per temperature
//! step and honors an optional wall-clock limit, which is what
//! [`SaEngine`](crate::engine::SaEngine) needs to publish live snapshots.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod types;

pub use config::{CoolingSchedule, SaConfig};
pub use runner::{SaResult, SaRunner};
pub use types::SaProblem;
