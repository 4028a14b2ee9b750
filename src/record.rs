//! Per-problem result records.
//!
//! Each worker produces exactly one record per problem. Both record kinds
//! implement [`SolveRecord`], which is all the worker pool and the
//! aggregator need to know about them.

use crate::exact::ExactOutcome;
use crate::ga::{GaResult, StopReason};
use std::fmt;
use std::time::Duration;

/// Marker rendered in place of an absent first-solution time.
pub const ABSENT_TIME: &str = "N/A";

/// Solver family used for a whole batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mode {
    /// Exhaustive enumeration.
    Exact,
    /// Genetic algorithm.
    Heuristic,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Mode::Exact => "exact",
            Mode::Heuristic => "heuristic",
        })
    }
}

/// Common view over result records.
pub trait SolveRecord: Clone + Send + fmt::Debug {
    /// Solver family that produces this record.
    const MODE: Mode;

    /// Header line of the delimited output.
    const CSV_HEADER: &'static str;

    /// 1-based problem number.
    fn problem_number(&self) -> usize;

    /// Whether the problem was solved exactly.
    fn solved_exactly(&self) -> bool;

    /// The value reported in progress lines and averaged by the aggregator:
    /// number of solutions (exact) or best fitness (heuristic).
    fn headline(&self) -> u64;

    /// Time to the first exact match, when the solver tracks one.
    fn first_hit_time(&self) -> Option<Duration> {
        None
    }

    /// Wall-clock time of the whole solve.
    fn elapsed(&self) -> Duration;

    /// One delimited output row, without line terminator.
    fn csv_row(&self) -> String;
}

/// Outcome of exhaustive enumeration on one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactResult {
    /// 1-based problem number.
    pub problem_number: usize,
    /// Time to the first matching subset; `None` when there is none.
    pub first_solution_time: Option<Duration>,
    /// Time to exhaust all subsets.
    pub all_solutions_time: Duration,
    /// Number of matching subsets.
    pub solutions_count: u64,
}

impl ExactResult {
    /// Builds a record for the problem at 0-based `index`.
    pub fn from_outcome(index: usize, outcome: &ExactOutcome) -> Self {
        Self {
            problem_number: index + 1,
            first_solution_time: outcome.time_to_first,
            all_solutions_time: outcome.time_to_all,
            solutions_count: outcome.match_count,
        }
    }
}

impl SolveRecord for ExactResult {
    const MODE: Mode = Mode::Exact;
    const CSV_HEADER: &'static str =
        "Problem Number,First Solution Time (s),All Solutions Time (s),Number of Solutions";

    fn problem_number(&self) -> usize {
        self.problem_number
    }

    fn solved_exactly(&self) -> bool {
        self.solutions_count > 0
    }

    fn headline(&self) -> u64 {
        self.solutions_count
    }

    fn first_hit_time(&self) -> Option<Duration> {
        self.first_solution_time
    }

    fn elapsed(&self) -> Duration {
        self.all_solutions_time
    }

    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.problem_number,
            format_optional_secs(self.first_solution_time),
            format_secs(self.all_solutions_time),
            self.solutions_count
        )
    }
}

/// Outcome of the genetic algorithm on one problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeuristicResult {
    /// 1-based problem number.
    pub problem_number: usize,
    /// Wall-clock time of the run.
    pub time_taken: Duration,
    /// Best fitness; 0 means an exact match.
    pub best_fitness: u64,
    /// Stop reason of the run.
    pub stop_reason: StopReason,
    /// Generation at which the run stopped.
    pub last_generation: usize,
}

impl HeuristicResult {
    /// Builds a record for the problem at 0-based `index`.
    pub fn from_ga(index: usize, result: &GaResult) -> Self {
        Self {
            problem_number: index + 1,
            time_taken: result.elapsed,
            best_fitness: result.best_fitness,
            stop_reason: result.stop_reason,
            last_generation: result.last_generation,
        }
    }

    /// `true` when the stall limit or the time budget ended the run.
    pub fn stopped_by_condition(&self) -> bool {
        self.stop_reason.stopped_by_condition()
    }
}

impl SolveRecord for HeuristicResult {
    const MODE: Mode = Mode::Heuristic;
    const CSV_HEADER: &'static str =
        "Problem Number,Time Taken (s),Best Fitness,Stopped By Condition,Last Generation";

    fn problem_number(&self) -> usize {
        self.problem_number
    }

    fn solved_exactly(&self) -> bool {
        self.best_fitness == 0
    }

    fn headline(&self) -> u64 {
        self.best_fitness
    }

    fn elapsed(&self) -> Duration {
        self.time_taken
    }

    fn csv_row(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.problem_number,
            format_secs(self.time_taken),
            self.best_fitness,
            self.stopped_by_condition(),
            self.last_generation
        )
    }
}

/// Seconds with six decimals.
pub fn format_secs(d: Duration) -> String {
    format!("{:.6}", d.as_secs_f64())
}

/// Seconds with six decimals, or [`ABSENT_TIME`].
pub fn format_optional_secs(d: Option<Duration>) -> String {
    d.map_or_else(|| ABSENT_TIME.to_string(), format_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_row() {
        let r = ExactResult {
            problem_number: 3,
            first_solution_time: Some(Duration::from_micros(1500)),
            all_solutions_time: Duration::from_millis(250),
            solutions_count: 2,
        };
        assert_eq!(r.csv_row(), "3,0.001500,0.250000,2");
        assert!(r.solved_exactly());
        assert_eq!(r.headline(), 2);
    }

    #[test]
    fn test_exact_row_absent_first_time() {
        let r = ExactResult {
            problem_number: 1,
            first_solution_time: None,
            all_solutions_time: Duration::from_secs(1),
            solutions_count: 0,
        };
        assert_eq!(r.csv_row(), "1,N/A,1.000000,0");
        assert!(!r.solved_exactly());
    }

    #[test]
    fn test_heuristic_row() {
        let r = HeuristicResult {
            problem_number: 7,
            time_taken: Duration::from_millis(125),
            best_fitness: 0,
            stop_reason: StopReason::ExactMatch,
            last_generation: 4,
        };
        assert_eq!(r.csv_row(), "7,0.125000,0,false,4");
        assert!(r.solved_exactly());

        let stalled = HeuristicResult {
            stop_reason: StopReason::Stalled,
            best_fitness: 12,
            ..r
        };
        assert_eq!(stalled.csv_row(), "7,0.125000,12,true,4");
        assert!(!stalled.solved_exactly());
    }

    #[test]
    fn test_from_outcome_is_one_based() {
        let outcome = ExactOutcome {
            time_to_first: None,
            time_to_all: Duration::ZERO,
            match_count: 0,
        };
        assert_eq!(ExactResult::from_outcome(0, &outcome).problem_number, 1);
    }

    #[test]
    fn test_headers() {
        assert_eq!(ExactResult::CSV_HEADER.split(',').count(), 4);
        assert_eq!(HeuristicResult::CSV_HEADER.split(',').count(), 5);
        assert_eq!(Mode::Heuristic.to_string(), "heuristic");
    }
}
