//! Exact-versus-heuristic comparison over the same problem file.

use super::summary::{BatchSummary, TimingStats};
use crate::record::Mode;
use std::fmt;

/// Side-by-side statistics of an exact and a heuristic batch.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    /// Time to the first matching subset, over problems that have one.
    pub exact_first_solution: Option<TimingStats>,
    /// Time to finish the enumeration.
    pub exact_all_solutions: Option<TimingStats>,
    /// GA time taken per problem.
    pub heuristic_time: Option<TimingStats>,
    /// Fraction of problems the GA solved with fitness 0; `None` when empty.
    pub heuristic_exact_ratio: Option<f64>,
}

/// Pairs an exact summary with a heuristic one.
///
/// Returns `None` unless `exact` is an exact-mode summary and `heuristic` a
/// heuristic-mode one.
pub fn compare(exact: &BatchSummary, heuristic: &BatchSummary) -> Option<Comparison> {
    if exact.mode != Mode::Exact || heuristic.mode != Mode::Heuristic {
        return None;
    }
    let heuristic_exact_ratio = (heuristic.total > 0)
        .then(|| heuristic.solved_exactly as f64 / heuristic.total as f64);

    Some(Comparison {
        exact_first_solution: exact.first_solution,
        exact_all_solutions: exact.elapsed,
        heuristic_time: heuristic.elapsed,
        heuristic_exact_ratio,
    })
}

fn cell(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.6}"))
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let first = self.exact_first_solution.as_ref();
        let ga = self.heuristic_time.as_ref();

        writeln!(
            f,
            "{:<9} | {:>16} | {:>16} | {:>11}",
            "metric", "exact first (s)", "heuristic (s)", "exact ratio"
        )?;
        writeln!(f, "{}", "-".repeat(62))?;
        writeln!(
            f,
            "{:<9} | {:>16} | {:>16} | {:>11}",
            "mean",
            cell(first.map(|s| s.mean)),
            cell(ga.map(|s| s.mean)),
            cell(self.heuristic_exact_ratio)
        )?;
        writeln!(
            f,
            "{:<9} | {:>16} | {:>16} | {:>11}",
            "variance",
            cell(first.and_then(|s| s.variance)),
            cell(ga.and_then(|s| s.variance)),
            "-"
        )?;
        writeln!(
            f,
            "{:<9} | {:>16} | {:>16} | {:>11}",
            "std-dev",
            cell(first.and_then(|s| s.std_dev)),
            cell(ga.and_then(|s| s.std_dev)),
            "-"
        )?;
        match &self.exact_all_solutions {
            Some(stats) => writeln!(f, "exact all solutions (s): {stats}"),
            None => writeln!(f, "exact all solutions (s): -"),
        }
    }
}
