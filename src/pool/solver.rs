//! Solvers the worker pool can dispatch to.

use crate::error::Result;
use crate::exact::{ExactConfig, ExactRunner};
use crate::ga::{GaConfig, GaRunner};
use crate::problem::Problem;
use crate::record::{ExactResult, HeuristicResult, SolveRecord};
use rand::Rng;

/// A solver applied uniformly to every problem of a batch.
///
/// `Sync` because every worker borrows the same solver.
pub trait BatchSolver: Sync {
    /// Record produced per problem.
    type Output: SolveRecord;

    /// Checks the solver parameters. Called once before any worker starts.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Solves the problem at 0-based `index` using the worker's generator.
    fn solve<R: Rng>(&self, index: usize, problem: &Problem, rng: &mut R) -> Result<Self::Output>;
}

/// Exhaustive enumeration, optionally modulo a fixed modulus.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver {
    /// Enumerator configuration.
    pub config: ExactConfig,
}

impl ExactSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ExactConfig) -> Self {
        Self { config }
    }
}

impl BatchSolver for ExactSolver {
    type Output = ExactResult;

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn solve<R: Rng>(&self, index: usize, problem: &Problem, _rng: &mut R) -> Result<ExactResult> {
        let outcome = ExactRunner::run(problem, &self.config)?;
        Ok(ExactResult::from_outcome(index, &outcome))
    }
}

/// Genetic algorithm.
#[derive(Debug, Clone, Default)]
pub struct HeuristicSolver {
    /// GA parameters. `config.seed` is ignored; each worker supplies its generator.
    pub config: GaConfig,
}

impl HeuristicSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: GaConfig) -> Self {
        Self { config }
    }
}

impl BatchSolver for HeuristicSolver {
    type Output = HeuristicResult;

    fn validate(&self) -> Result<()> {
        self.config.validate()
    }

    fn solve<R: Rng>(&self, index: usize, problem: &Problem, rng: &mut R) -> Result<HeuristicResult> {
        let result = GaRunner::run_with_rng(problem, &self.config, rng)?;
        Ok(HeuristicResult::from_ga(index, &result))
    }
}
