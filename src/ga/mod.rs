//! Genetic Algorithm for subset-sum approximation.
//!
//! Evolves a population of indicator vectors toward a subset whose weight
//! sum equals the target. Used when exhaustive enumeration is infeasible;
//! it does not guarantee finding an exact match.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, tournament size,
//!   mutation rate, stopping policy)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Best individual, stop reason and fitness history
//! - [`StopReason`]: Which termination condition fired
//!
//! # Submodules
//!
//! - [`operators`]: One-point crossover and bit-flip mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

mod config;
pub mod operators;
mod runner;
mod selection;
mod types;

pub use config::{GaConfig, REFERENCE_TIME};
pub use runner::{solve_heuristic, GaResult, GaRunner, StopReason};
pub use selection::{select_population, tournament};
pub use types::{subset_fitness, Chromosome, UNEVALUATED};
