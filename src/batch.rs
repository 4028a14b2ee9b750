//! Batch driver: load → solve all → aggregate → persist, once per input file.
//!
//! A [`BatchPlan`] is an ordered list of [`BatchSpec`]s. The [`BatchDriver`]
//! runs them one after another; a failing batch is logged and the driver
//! moves on to the next one.
//!
//! # Failure policy
//!
//! | Failure | Effect |
//! |---|---|
//! | input unreadable | logged, batch runs with zero problems, header-only output |
//! | malformed line | batch aborted, no output written |
//! | invalid parameters | batch aborted before any worker starts |
//! | worker failure | batch aborted, no output written |
//! | output unwritable | batch reported as failed, no partial file left |

use crate::error::{KnapsackError, Result};
use crate::exact::ExactConfig;
use crate::ga::GaConfig;
use crate::io::{load_problems, write_results};
use crate::pool::{BatchSolver, ExactSolver, HeuristicSolver, PoolConfig, WorkerPool};
use crate::problem::Problem;
use crate::record::{ExactResult, HeuristicResult, Mode};
use crate::report::{compare, render_table, BatchSummary, Comparison};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// Weight densities of the standard modular batches.
pub const STANDARD_DENSITIES: [f64; 4] = [0.8, 1.0, 1.2, 1.4];

/// Bit width the densities are measured against.
pub const DENSITY_BITS: f64 = 24.0;

/// Number of plain problem files in the standard layout.
const STANDARD_FILES: usize = 4;

/// Modulus `floor(2^(24 / density))` of a reduced weight space.
///
/// ```
/// use u_knapsack::batch::modulus_for_density;
///
/// assert_eq!(modulus_for_density(1.0), 16_777_216);
/// assert_eq!(modulus_for_density(0.8), 1 << 30);
/// ```
pub fn modulus_for_density(density: f64) -> i64 {
    2f64.powf(DENSITY_BITS / density) as i64
}

/// One input file solved with one solver family.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchSpec {
    /// Label used in logs.
    pub name: String,
    /// Problem file.
    pub input: PathBuf,
    /// Result file.
    pub output: PathBuf,
    /// Solver family.
    pub mode: Mode,
    /// Modulus for the exact solver; ignored by the heuristic.
    pub modulus: Option<i64>,
}

impl BatchSpec {
    /// An exact batch without modulus.
    pub fn exact(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input: input.into(),
            output: output.into(),
            mode: Mode::Exact,
            modulus: None,
        }
    }

    /// A heuristic batch.
    pub fn heuristic(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            mode: Mode::Heuristic,
            ..Self::exact(name, input, output)
        }
    }

    /// Sets the modulus.
    pub fn with_modulus(mut self, modulus: i64) -> Self {
        self.modulus = Some(modulus);
        self
    }
}

/// Ordered list of batches.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BatchPlan {
    /// Batches in run order.
    pub batches: Vec<BatchSpec>,
}

impl BatchPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a batch.
    pub fn with_batch(mut self, spec: BatchSpec) -> Self {
        self.batches.push(spec);
        self
    }

    /// The benchmark layout under `dir`:
    ///
    /// - `knapsack_problems_{1..4}.csv` exact, into `knapsack_solutions_{i}.csv`
    /// - `knapsack_problems_{5..8}.csv` exact modulo [`modulus_for_density`]
    ///   of [`STANDARD_DENSITIES`] in order, into `knapsack_solutions_{i}.csv`
    /// - `knapsack_problems_{1..8}.csv` heuristic, into
    ///   `genetic_knapsack_solutions_{i}.csv`
    pub fn standard(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let problems = |i: usize| dir.join(format!("knapsack_problems_{i}.csv"));
        let solutions = |i: usize| dir.join(format!("knapsack_solutions_{i}.csv"));

        let mut plan = Self::new();
        for i in 1..=STANDARD_FILES {
            plan.batches
                .push(BatchSpec::exact(format!("exact-{i}"), problems(i), solutions(i)));
        }
        for (k, &density) in STANDARD_DENSITIES.iter().enumerate() {
            let i = STANDARD_FILES + k + 1;
            plan.batches.push(
                BatchSpec::exact(format!("exact-mod-{i}"), problems(i), solutions(i))
                    .with_modulus(modulus_for_density(density)),
            );
        }
        for i in 1..=STANDARD_FILES + STANDARD_DENSITIES.len() {
            plan.batches.push(BatchSpec::heuristic(
                format!("genetic-{i}"),
                problems(i),
                dir.join(format!("genetic_knapsack_solutions_{i}.csv")),
            ));
        }
        plan
    }

    /// Number of batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    /// Whether the plan has no batches.
    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }
}

/// Result table of one batch.
#[derive(Debug, Clone)]
pub enum BatchRecords {
    /// Exact-mode records.
    Exact(Vec<ExactResult>),
    /// Heuristic-mode records.
    Heuristic(Vec<HeuristicResult>),
}

impl BatchRecords {
    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Self::Exact(r) => r.len(),
            Self::Heuristic(r) => r.len(),
        }
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Console table of the records.
    pub fn table(&self) -> String {
        match self {
            Self::Exact(r) => render_table(r),
            Self::Heuristic(r) => render_table(r),
        }
    }
}

/// Outcome of a completed batch.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// The batch that ran.
    pub spec: BatchSpec,
    /// Aggregate statistics.
    pub summary: BatchSummary,
    /// Raw result table, in problem order.
    pub records: BatchRecords,
    /// Wall-clock time of load, solve and persist.
    pub elapsed: Duration,
}

/// Pairs each successful exact batch with the first successful heuristic
/// batch over the same input file, in plan order.
pub fn comparisons(outcomes: &[Result<BatchReport>]) -> Vec<(&Path, Comparison)> {
    let reports: Vec<&BatchReport> = outcomes.iter().filter_map(|o| o.as_ref().ok()).collect();
    reports
        .iter()
        .copied()
        .filter(|r| r.spec.mode == Mode::Exact)
        .filter_map(|exact| {
            let heuristic = reports
                .iter()
                .find(|r| r.spec.mode == Mode::Heuristic && r.spec.input == exact.spec.input)?;
            compare(&exact.summary, &heuristic.summary).map(|c| (exact.spec.input.as_path(), c))
        })
        .collect()
}

/// Runs batches on a shared worker pool configuration.
#[derive(Debug, Clone, Default)]
pub struct BatchDriver {
    pool: WorkerPool,
    ga: GaConfig,
}

impl BatchDriver {
    /// Creates a driver.
    pub fn new(pool: PoolConfig, ga: GaConfig) -> Self {
        Self {
            pool: WorkerPool::new(pool),
            ga,
        }
    }

    /// Runs a single batch.
    pub fn run_batch(&self, spec: &BatchSpec) -> Result<BatchReport> {
        let start = Instant::now();
        info!(
            batch = %spec.name,
            mode = %spec.mode,
            input = %spec.input.display(),
            modulus = ?spec.modulus,
            "batch started"
        );

        let problems = match load_problems(&spec.input) {
            Ok(p) => p,
            Err(e @ KnapsackError::Io { .. }) => {
                warn!(
                    batch = %spec.name,
                    error = %e,
                    "input unreadable, continuing with no problems"
                );
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let records = match spec.mode {
            Mode::Exact => {
                let solver =
                    ExactSolver::new(ExactConfig::default().with_modulus_option(spec.modulus));
                BatchRecords::Exact(self.solve_and_persist(spec, &problems, &solver)?)
            }
            Mode::Heuristic => {
                let solver = HeuristicSolver::new(self.ga.clone());
                BatchRecords::Heuristic(self.solve_and_persist(spec, &problems, &solver)?)
            }
        };

        let summary = match &records {
            BatchRecords::Exact(r) => BatchSummary::from_records(r),
            BatchRecords::Heuristic(r) => BatchSummary::from_records(r),
        };
        let elapsed = start.elapsed();
        info!(
            batch = %spec.name,
            problems = summary.total,
            solved_exactly = summary.solved_exactly,
            output = %spec.output.display(),
            elapsed_secs = elapsed.as_secs_f64(),
            "batch finished"
        );

        Ok(BatchReport {
            spec: spec.clone(),
            summary,
            records,
            elapsed,
        })
    }

    /// Runs every batch of the plan in order, returning one outcome per batch.
    pub fn run_all(&self, plan: &BatchPlan) -> Vec<Result<BatchReport>> {
        self.run_all_with(plan, |_| {})
    }

    /// Like [`run_all`](Self::run_all), handing each outcome to `on_batch`
    /// as soon as the batch ends.
    pub fn run_all_with<F>(&self, plan: &BatchPlan, mut on_batch: F) -> Vec<Result<BatchReport>>
    where
        F: FnMut(&Result<BatchReport>),
    {
        plan.batches
            .iter()
            .map(|spec| {
                let outcome = self.run_batch(spec);
                if let Err(e) = &outcome {
                    error!(batch = %spec.name, error = %e, "batch failed");
                }
                on_batch(&outcome);
                outcome
            })
            .collect()
    }

    fn solve_and_persist<S: BatchSolver>(
        &self,
        spec: &BatchSpec,
        problems: &[Problem],
        solver: &S,
    ) -> Result<Vec<S::Output>> {
        let records = self.pool.run(problems, solver)?;
        write_results(&spec.output, &records)?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use crate::record::SolveRecord;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "u-knapsack-batch-{tag}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn driver() -> BatchDriver {
        BatchDriver::new(
            PoolConfig::default().with_workers(2).with_seed(3),
            GaConfig::default()
                .with_population_size(8)
                .with_max_generations(20),
        )
    }

    #[test]
    fn test_density_moduli() {
        let m: Vec<i64> = STANDARD_DENSITIES.iter().map(|&d| modulus_for_density(d)).collect();
        assert_eq!(m, vec![1_073_741_824, 16_777_216, 1_048_576, 144_715]);
    }

    #[test]
    fn test_standard_plan_layout() {
        let plan = BatchPlan::standard("data");
        assert_eq!(plan.len(), 16);

        let first = &plan.batches[0];
        assert_eq!(first.mode, Mode::Exact);
        assert_eq!(first.modulus, None);
        assert_eq!(first.input, Path::new("data/knapsack_problems_1.csv"));
        assert_eq!(first.output, Path::new("data/knapsack_solutions_1.csv"));

        let modular = &plan.batches[4];
        assert_eq!(modular.input, Path::new("data/knapsack_problems_5.csv"));
        assert_eq!(modular.modulus, Some(1_073_741_824));
        assert_eq!(plan.batches[7].modulus, Some(modulus_for_density(1.4)));

        let genetic = &plan.batches[8];
        assert_eq!(genetic.mode, Mode::Heuristic);
        assert_eq!(genetic.input, Path::new("data/knapsack_problems_1.csv"));
        assert_eq!(
            genetic.output,
            Path::new("data/genetic_knapsack_solutions_1.csv")
        );

        // The modular files get a heuristic run too, without modulus.
        let last = &plan.batches[15];
        assert_eq!(last.mode, Mode::Heuristic);
        assert_eq!(last.modulus, None);
        assert_eq!(last.input, Path::new("data/knapsack_problems_8.csv"));
        assert_eq!(
            last.output,
            Path::new("data/genetic_knapsack_solutions_8.csv")
        );
    }

    #[test]
    fn test_comparisons_pair_by_input() {
        let dir = scratch_dir("compare");
        let a = dir.join("a.csv");
        let b = dir.join("b.csv");
        fs::write(&a, "1,2,3,3\n4,5,100\n").unwrap();
        fs::write(&b, "2,2,4\n").unwrap();

        let plan = BatchPlan::new()
            .with_batch(BatchSpec::exact("a", &a, dir.join("a-exact.csv")))
            .with_batch(BatchSpec::exact("b", &b, dir.join("b-exact.csv")))
            .with_batch(BatchSpec::heuristic("a-ga", &a, dir.join("a-ga.csv")));
        let outcomes = driver().run_all(&plan);

        let pairs = comparisons(&outcomes);
        assert_eq!(pairs.len(), 1);
        let (input, c) = &pairs[0];
        assert_eq!(*input, a.as_path());
        assert_eq!(c.exact_first_solution.unwrap().samples, 1);
        assert_eq!(c.exact_all_solutions.unwrap().samples, 2);
        assert_eq!(c.heuristic_time.unwrap().samples, 2);
        assert!(c.heuristic_exact_ratio.unwrap() <= 0.5);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_exact_batch_writes_results() {
        let dir = scratch_dir("exact");
        let input = dir.join("in.csv");
        let output = dir.join("out.csv");
        fs::write(&input, "1,2,3,4,5\n5,0\n").unwrap();

        let report = driver()
            .run_batch(&BatchSpec::exact("t", &input, &output))
            .unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.solved_exactly, 1);
        assert_eq!(report.records.len(), 2);

        let text = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], ExactResult::CSV_HEADER);
        assert!(lines[1].starts_with("1,") && lines[1].ends_with(",2"));
        assert!(lines[2].starts_with("2,N/A,"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_modular_batch_counts_wrapped_sums() {
        let dir = scratch_dir("modular");
        let input = dir.join("in.csv");
        let output = dir.join("out.csv");
        fs::write(&input, "7,8,5\n").unwrap();

        let spec = BatchSpec::exact("m", &input, &output).with_modulus(10);
        let report = driver().run_batch(&spec).unwrap();
        match report.records {
            BatchRecords::Exact(r) => assert_eq!(r[0].solutions_count, 1),
            BatchRecords::Heuristic(_) => panic!("wrong mode"),
        }
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_unreadable_input_gives_empty_batch() {
        let dir = scratch_dir("missing");
        let output = dir.join("out.csv");
        let spec = BatchSpec::heuristic("h", dir.join("absent.csv"), &output);

        let report = driver().run_batch(&spec).unwrap();
        assert_eq!(report.summary.total, 0);
        assert!(report.summary.percentage_solved.is_none());
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            format!("{}\n", HeuristicResult::CSV_HEADER)
        );
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_input_aborts_without_output() {
        let dir = scratch_dir("malformed");
        let input = dir.join("in.csv");
        let output = dir.join("out.csv");
        fs::write(&input, "1,2\n1,two,3\n").unwrap();

        let err = driver()
            .run_batch(&BatchSpec::exact("bad", &input, &output))
            .unwrap_err();
        assert!(matches!(err, KnapsackError::Parse { line: 2, .. }));
        assert!(!output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_batch_does_not_stop_plan() {
        let dir = scratch_dir("plan");
        let good = dir.join("good.csv");
        let bad = dir.join("bad.csv");
        fs::write(&good, "1,1\n").unwrap();
        fs::write(&bad, "x\n").unwrap();

        let plan = BatchPlan::new()
            .with_batch(BatchSpec::exact("bad", &bad, dir.join("bad-out.csv")))
            .with_batch(
                BatchSpec::exact("bad-modulus", &good, dir.join("m-out.csv")).with_modulus(0),
            )
            .with_batch(BatchSpec::exact("good", &good, dir.join("good-out.csv")));

        let mut seen = 0;
        let outcomes = driver().run_all_with(&plan, |_| seen += 1);
        assert_eq!(seen, 3);
        assert!(outcomes[0].is_err());
        assert!(outcomes[1].is_err());
        assert_eq!(outcomes[2].as_ref().unwrap().summary.solved_exactly, 1);
        assert!(dir.join("good-out.csv").exists());
        assert!(!dir.join("m-out.csv").exists());
        fs::remove_dir_all(&dir).unwrap();
    }
}
