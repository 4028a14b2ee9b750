//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{DegenerateInput, Result};
use std::time::Duration;

/// Reference time of one exhaustive solve; the default budget is twice this.
pub const REFERENCE_TIME: Duration = Duration::from_secs(5);

/// Configuration for the Genetic Algorithm.
///
/// Controls population size, tournament size, mutation rate and the four
/// termination conditions.
///
/// # Defaults
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 10_000);
/// assert_eq!(config.max_generations, 1_000);
/// assert_eq!(config.time_budget, Duration::from_secs(10));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::time::Duration;
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_tournament_size(5)
///     .with_mutation_rate(0.05)
///     .with_reference_time(Duration::from_secs(1));
/// assert_eq!(config.time_budget, Duration::from_secs(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    ///
    /// Must be even: children are produced pairwise, so an odd population
    /// would lose one individual every generation.
    pub population_size: usize,

    /// Generation cap.
    pub max_generations: usize,

    /// Per-bit flip probability applied to every child (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of candidates drawn (with replacement) per tournament.
    pub tournament_size: usize,

    /// Consecutive generations without improvement of the best fitness
    /// before stopping. Set to 0 to disable.
    pub stall_limit: usize,

    /// Wall-clock budget. Checked once per generation, after evaluation.
    pub time_budget: Duration,

    /// Whether to evaluate individuals in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Leave off when the GA
    /// already runs inside a worker pool.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// Only used by [`GaRunner::run`](super::GaRunner::run); callers that
    /// pass their own generator ignore it. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            max_generations: 1_000,
            mutation_rate: 0.03,
            tournament_size: 3,
            stall_limit: 2,
            time_budget: REFERENCE_TIME * 2,
            parallel: false,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the stall limit (0 to disable).
    pub fn with_stall_limit(mut self, limit: usize) -> Self {
        self.stall_limit = limit;
        self
    }

    /// Sets the wall-clock budget directly.
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = budget;
        self
    }

    /// Sets the budget to twice the given reference solve time.
    pub fn with_reference_time(mut self, reference: Duration) -> Self {
        self.time_budget = reference * 2;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    ///
    /// Rejects settings under which selection or reproduction is undefined.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(DegenerateInput::EmptyPopulation.into());
        }
        if self.population_size % 2 != 0 {
            return Err(DegenerateInput::OddPopulation(self.population_size).into());
        }
        if self.max_generations == 0 {
            return Err(DegenerateInput::ZeroGenerations.into());
        }
        if self.tournament_size == 0 {
            return Err(DegenerateInput::ZeroTournament.into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(DegenerateInput::MutationRate(self.mutation_rate).into());
        }
        if self.time_budget.is_zero() {
            return Err(DegenerateInput::ZeroTimeBudget.into());
        }
        Ok(())
    }
}
