//! Exhaustive enumeration loop.

use super::combination::for_each_combination;
use super::config::ExactConfig;
use crate::error::Result;
use crate::problem::Problem;
use std::time::{Duration, Instant};

/// Result of one exhaustive enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExactOutcome {
    /// Elapsed time at the first matching subset; `None` when nothing matched.
    pub time_to_first: Option<Duration>,

    /// Elapsed time once every subset size has been exhausted.
    pub time_to_all: Duration,

    /// Number of non-empty subsets whose (reduced) sum equals the (reduced) target.
    pub match_count: u64,
}

/// Runs the exhaustive enumerator.
///
/// # Usage
///
/// ```
/// use u_knapsack::exact::{ExactConfig, ExactRunner};
/// use u_knapsack::Problem;
///
/// let problem = Problem::new(vec![1, 2, 3, 4], 5).unwrap();
/// let outcome = ExactRunner::run(&problem, &ExactConfig::default()).unwrap();
/// assert_eq!(outcome.match_count, 2);
/// ```
pub struct ExactRunner;

impl ExactRunner {
    /// Enumerates every non-empty subset of `problem`.
    pub fn run(problem: &Problem, config: &ExactConfig) -> Result<ExactOutcome> {
        config.validate()?;
        Ok(enumerate(problem.weights(), problem.target(), config.modulus))
    }
}

/// Free-function form of [`ExactRunner::run`] over raw weights.
pub fn solve_exact(weights: &[i64], target: i64, modulus: Option<i64>) -> Result<ExactOutcome> {
    ExactConfig::default()
        .with_modulus_option(modulus)
        .validate()?;
    Ok(enumerate(weights, target, modulus))
}

fn enumerate(weights: &[i64], target: i64, modulus: Option<i64>) -> ExactOutcome {
    let n = weights.len();
    let start = Instant::now();
    let reduced_target = match modulus {
        Some(m) => reduce(i128::from(target), m),
        None => target,
    };

    let mut time_to_first = None;
    let mut match_count = 0u64;

    for r in 1..=n {
        for_each_combination(n, r, |bits| {
            let sum = match modulus {
                Some(m) => modular_sum(weights, bits, m),
                None => plain_sum(weights, bits),
            };
            if sum == reduced_target {
                match_count += 1;
                if time_to_first.is_none() {
                    time_to_first = Some(start.elapsed());
                }
            }
        });
    }

    ExactOutcome {
        time_to_first,
        time_to_all: start.elapsed(),
        match_count,
    }
}

/// Fixed-width sum of the selected weights.
fn plain_sum(weights: &[i64], bits: &[bool]) -> i64 {
    weights
        .iter()
        .zip(bits)
        .filter(|&(_, &b)| b)
        .fold(0i64, |acc, (&w, _)| acc.wrapping_add(w))
}

/// Running sum reduced after every addition.
fn modular_sum(weights: &[i64], bits: &[bool], m: i64) -> i64 {
    weights
        .iter()
        .zip(bits)
        .filter(|&(_, &b)| b)
        .fold(0i64, |acc, (&w, _)| {
            reduce(i128::from(acc) + i128::from(w), m)
        })
}

/// Non-negative remainder of `value` modulo `m`; always in `[0, m)`.
pub fn reduce(value: i128, m: i64) -> i64 {
    value.rem_euclid(i128::from(m)) as i64
}
