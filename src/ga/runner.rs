//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → stop checks → selection → crossover →
//! mutation → repeat.

use super::config::GaConfig;
use super::operators::reproduce;
use super::selection::select_population;
use super::types::Chromosome;
use crate::error::Result;
use crate::problem::Problem;
use crate::random::create_rng;
use rand::Rng;
use std::time::{Duration, Instant};

/// Which termination condition ended a run.
///
/// Conditions are checked once per generation in declaration order; the
/// first to fire wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// Best fitness reached 0.
    ExactMatch,
    /// No improvement for `stall_limit` consecutive generations.
    Stalled,
    /// Elapsed time exceeded the time budget.
    TimeBudget,
    /// Generation counter reached `max_generations`.
    MaxGenerations,
}

impl StopReason {
    /// `true` for the stall and time-budget stops.
    pub fn stopped_by_condition(self) -> bool {
        matches!(self, Self::Stalled | Self::TimeBudget)
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    /// The best individual found during the entire run.
    pub best: Chromosome,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: u64,

    /// Generation index at which the run stopped, or `max_generations`
    /// when the cap was reached.
    pub last_generation: usize,

    /// Why the run ended.
    pub stop_reason: StopReason,

    /// Wall-clock time from the first evaluation to termination.
    pub elapsed: Duration,

    /// Best-so-far fitness after each evaluated generation.
    pub fitness_history: Vec<u64>,
}

impl GaResult {
    /// `true` when the run ended on the stall limit or the time budget.
    pub fn stopped_by_condition(&self) -> bool {
        self.stop_reason.stopped_by_condition()
    }
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_knapsack::ga::{GaConfig, GaRunner, StopReason};
/// use u_knapsack::Problem;
///
/// let problem = Problem::new(vec![0, 0, 0], 0).unwrap();
/// let config = GaConfig::default().with_population_size(4).with_seed(42);
/// let result = GaRunner::run(&problem, &config).unwrap();
/// assert_eq!(result.best_fitness, 0);
/// assert_eq!(result.stop_reason, StopReason::ExactMatch);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA with a generator built from `config.seed`.
    pub fn run(problem: &Problem, config: &GaConfig) -> Result<GaResult> {
        let mut rng = create_rng(config.seed);
        Self::run_with_rng(problem, config, &mut rng)
    }

    /// Runs the GA drawing from a caller-owned generator.
    pub fn run_with_rng<R: Rng>(
        problem: &Problem,
        config: &GaConfig,
        rng: &mut R,
    ) -> Result<GaResult> {
        config.validate()?;
        Ok(evolve(problem.weights(), problem.target(), config, rng))
    }
}

/// Free-function form of [`GaRunner::run_with_rng`] over raw weights.
pub fn solve_heuristic<R: Rng>(
    weights: &[i64],
    target: i64,
    config: &GaConfig,
    rng: &mut R,
) -> Result<GaResult> {
    config.validate()?;
    Ok(evolve(weights, target, config, rng))
}

fn evolve<R: Rng>(weights: &[i64], target: i64, config: &GaConfig, rng: &mut R) -> GaResult {
    let n = weights.len();

    // 1. Initialize population
    let mut population: Vec<Chromosome> = (0..config.population_size)
        .map(|_| Chromosome::random(n, rng))
        .collect();

    let start = Instant::now();
    let mut best: Option<Chromosome> = None;
    let mut fitness_history = Vec::new();
    let mut stall = 0usize;
    let mut stop_reason = StopReason::MaxGenerations;

    // 2. Evolutionary loop
    let mut generation = 0usize;
    while generation < config.max_generations {
        evaluate_population(weights, target, &mut population, config.parallel);

        let gen_best = find_best(&population);
        let improved = best
            .as_ref()
            .map_or(true, |b| gen_best.fitness() < b.fitness());
        if improved {
            best = Some(gen_best.clone());
            stall = 0;
        } else {
            stall += 1;
        }

        let best_fitness = best.as_ref().map_or(u64::MAX, Chromosome::fitness);
        fitness_history.push(best_fitness);

        // 3. Stop checks, first to fire wins
        if best_fitness == 0 {
            stop_reason = StopReason::ExactMatch;
            break;
        }
        if config.stall_limit > 0 && stall >= config.stall_limit {
            stop_reason = StopReason::Stalled;
            break;
        }
        if start.elapsed() > config.time_budget {
            stop_reason = StopReason::TimeBudget;
            break;
        }

        // 4. Selection and reproduction
        let selected = select_population(&population, config.tournament_size, rng);
        population = reproduce(&selected, config.mutation_rate, rng);
        generation += 1;
    }

    let elapsed = start.elapsed();
    // max_generations >= 1 is validated, so at least one generation ran.
    let best = best.unwrap_or_else(|| population[0].clone());

    GaResult {
        best_fitness: best.fitness(),
        best,
        last_generation: generation,
        stop_reason,
        elapsed,
        fitness_history,
    }
}

/// Evaluate all individuals in the population.
fn evaluate_population(weights: &[i64], target: i64, population: &mut [Chromosome], parallel: bool) {
    #[cfg(feature = "parallel")]
    if parallel {
        use rayon::prelude::*;
        population.par_iter_mut().for_each(|c| {
            c.evaluate(weights, target);
        });
        return;
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    for c in population.iter_mut() {
        c.evaluate(weights, target);
    }
}

/// First individual with the lowest fitness.
fn find_best(population: &[Chromosome]) -> &Chromosome {
    population
        .iter()
        .min_by_key(|c| c.fitness())
        .expect("population must not be empty")
}

// ============================================================================
// Tests
// ============================================================================
