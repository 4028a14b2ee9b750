//! Batch summary statistics.

use crate::record::{Mode, SolveRecord};
use std::fmt;
use std::time::Duration;

/// Mean and spread of a set of durations, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingStats {
    /// Number of samples.
    pub samples: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample variance (n − 1 denominator); `None` below two samples.
    pub variance: Option<f64>,
    /// Square root of `variance`.
    pub std_dev: Option<f64>,
}

impl TimingStats {
    /// Computes the statistics, or `None` when there are no samples.
    ///
    /// ```
    /// use std::time::Duration;
    /// use u_knapsack::report::TimingStats;
    ///
    /// let s = TimingStats::from_durations([1, 2, 3].map(Duration::from_secs)).unwrap();
    /// assert_eq!(s.mean, 2.0);
    /// assert_eq!(s.variance, Some(1.0));
    /// ```
    pub fn from_durations<I>(durations: I) -> Option<Self>
    where
        I: IntoIterator<Item = Duration>,
    {
        let secs: Vec<f64> = durations.into_iter().map(|d| d.as_secs_f64()).collect();
        if secs.is_empty() {
            return None;
        }

        let n = secs.len() as f64;
        let mean = secs.iter().sum::<f64>() / n;
        let variance = (secs.len() >= 2)
            .then(|| secs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0));

        Some(Self {
            samples: secs.len(),
            mean,
            variance,
            std_dev: variance.map(f64::sqrt),
        })
    }
}

impl fmt::Display for TimingStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mean {:.6}", self.mean)?;
        if let (Some(var), Some(sd)) = (self.variance, self.std_dev) {
            write!(f, ", variance {var:.6}, std-dev {sd:.6}")?;
        }
        write!(f, " (n={})", self.samples)
    }
}

/// Aggregate view of one batch.
///
/// A problem counts as solved exactly when the enumerator found at least one
/// matching subset, or when the GA reached fitness 0.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSummary {
    /// Solver family of the batch.
    pub mode: Mode,
    /// Number of problems.
    pub total: usize,
    /// Number of problems solved exactly.
    pub solved_exactly: usize,
    /// `100 · solved_exactly / total`; `None` for an empty batch.
    pub percentage_solved: Option<f64>,
    /// Mean solution count (exact) or mean best fitness (heuristic).
    pub mean_headline: Option<f64>,
    /// First-solution times over the problems that have one.
    pub first_solution: Option<TimingStats>,
    /// All-solutions time (exact) or time taken (heuristic).
    pub elapsed: Option<TimingStats>,
}

impl BatchSummary {
    /// Summarizes a complete result table.
    pub fn from_records<T: SolveRecord>(records: &[T]) -> Self {
        let total = records.len();
        let solved_exactly = records.iter().filter(|r| r.solved_exactly()).count();

        let (percentage_solved, mean_headline) = if total == 0 {
            (None, None)
        } else {
            let headline_sum: f64 = records.iter().map(|r| r.headline() as f64).sum();
            (
                Some(100.0 * solved_exactly as f64 / total as f64),
                Some(headline_sum / total as f64),
            )
        };

        Self {
            mode: T::MODE,
            total,
            solved_exactly,
            percentage_solved,
            mean_headline,
            first_solution: TimingStats::from_durations(
                records.iter().filter_map(T::first_hit_time),
            ),
            elapsed: TimingStats::from_durations(records.iter().map(T::elapsed)),
        }
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (headline, elapsed) = match self.mode {
            Mode::Exact => ("mean solutions", "all solutions time (s)"),
            Mode::Heuristic => ("mean best fitness", "time taken (s)"),
        };

        writeln!(f, "mode: {}", self.mode)?;
        writeln!(f, "problems: {}", self.total)?;
        write!(f, "solved exactly: {}", self.solved_exactly)?;
        if let Some(pct) = self.percentage_solved {
            write!(f, " ({pct:.2}%)")?;
        }
        writeln!(f)?;
        if let Some(mean) = self.mean_headline {
            writeln!(f, "{headline}: {mean:.2}")?;
        }
        if let Some(stats) = &self.first_solution {
            writeln!(f, "first solution time (s): {stats}")?;
        }
        if let Some(stats) = &self.elapsed {
            writeln!(f, "{elapsed}: {stats}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::StopReason;
    use crate::record::{ExactResult, HeuristicResult};

    fn exact(n: usize, first_ms: Option<u64>, count: u64) -> ExactResult {
        ExactResult {
            problem_number: n,
            first_solution_time: first_ms.map(Duration::from_millis),
            all_solutions_time: Duration::from_millis(100),
            solutions_count: count,
        }
    }

    #[test]
    fn test_empty_batch_has_no_percentage() {
        let s = BatchSummary::from_records::<ExactResult>(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.solved_exactly, 0);
        assert!(s.percentage_solved.is_none());
        assert!(s.mean_headline.is_none());
        assert!(s.elapsed.is_none());
        let text = s.to_string();
        assert!(text.contains("problems: 0"));
        assert!(!text.contains('%'));
    }

    #[test]
    fn test_exact_summary() {
        let records = [
            exact(1, Some(10), 2),
            exact(2, None, 0),
            exact(3, Some(30), 4),
            exact(4, None, 0),
        ];
        let s = BatchSummary::from_records(&records);
        assert_eq!(s.mode, Mode::Exact);
        assert_eq!(s.solved_exactly, 2);
        assert_eq!(s.percentage_solved, Some(50.0));
        assert_eq!(s.mean_headline, Some(1.5));

        let first = s.first_solution.unwrap();
        assert_eq!(first.samples, 2);
        assert!((first.mean - 0.02).abs() < 1e-12);

        let elapsed = s.elapsed.unwrap();
        assert_eq!(elapsed.samples, 4);
        assert!(elapsed.variance.unwrap().abs() < 1e-12);
        assert!(s.to_string().contains("50.00%"));
    }

    #[test]
    fn test_heuristic_summary() {
        let base = HeuristicResult {
            problem_number: 1,
            time_taken: Duration::from_millis(5),
            best_fitness: 0,
            stop_reason: StopReason::ExactMatch,
            last_generation: 1,
        };
        let records = [
            base,
            HeuristicResult {
                problem_number: 2,
                best_fitness: 9,
                stop_reason: StopReason::Stalled,
                ..base
            },
        ];
        let s = BatchSummary::from_records(&records);
        assert_eq!(s.solved_exactly, 1);
        assert_eq!(s.mean_headline, Some(4.5));
        assert!(s.first_solution.is_none());
        assert!(s.to_string().contains("mean best fitness: 4.50"));
    }

    #[test]
    fn test_single_sample_has_no_variance() {
        let s = TimingStats::from_durations([Duration::from_secs(2)]).unwrap();
        assert_eq!(s.samples, 1);
        assert_eq!(s.mean, 2.0);
        assert!(s.variance.is_none());
        assert!(s.std_dev.is_none());
        assert!(TimingStats::from_durations(std::iter::empty()).is_none());
    }

    #[test]
    fn test_sample_variance() {
        let s = TimingStats::from_durations([2, 4, 4, 4, 5, 5, 7, 9].map(Duration::from_secs))
            .unwrap();
        assert_eq!(s.mean, 5.0);
        assert!((s.variance.unwrap() - 32.0 / 7.0).abs() < 1e-12);
        assert!((s.std_dev.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }
}
