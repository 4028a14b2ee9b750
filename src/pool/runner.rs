//! Worker pool execution.
//!
//! [`WorkerPool`] fans a batch of problems out to a fixed set of OS threads:
//! seed the queue → spawn workers → each worker pops, solves, records →
//! join all workers → hand back the complete result table.

use super::config::PoolConfig;
use super::queue::JobQueue;
use super::solver::BatchSolver;
use crate::error::{KnapsackError, Result};
use crate::problem::Problem;
use crate::random::{create_rng, worker_seed};
use crate::record::SolveRecord;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info};

/// Observer notified once per solved problem.
///
/// Calls are serialized with the result-slot writes, so an implementation
/// sees notifications one at a time even though workers run concurrently.
pub trait Progress<T>: Sync {
    /// Called after the record for `index` has been stored.
    ///
    /// `completed` counts records stored so far in this batch, including
    /// this one; `remaining` is the number of problems still queued.
    fn on_solved(&self, index: usize, record: &T, completed: usize, total: usize, remaining: usize);
}

/// Emits one `tracing` info event per solved problem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl<T: SolveRecord> Progress<T> for LogProgress {
    fn on_solved(&self, _index: usize, record: &T, completed: usize, total: usize, remaining: usize) {
        let mode = T::MODE;
        info!(
            mode = %mode,
            problem = record.problem_number(),
            total,
            completed,
            remaining,
            headline = record.headline(),
            "problem solved"
        );
    }
}

/// Result slots plus the completion counter, guarded together.
struct Slots<T> {
    results: Vec<Option<T>>,
    completed: usize,
}

/// Runs a batch of problems across worker threads.
///
/// # Usage
///
/// ```
/// use u_knapsack::pool::{ExactSolver, PoolConfig, WorkerPool};
/// use u_knapsack::Problem;
///
/// let problems = vec![
///     Problem::new(vec![1, 2, 3, 4], 5).unwrap(),
///     Problem::new(vec![5], 0).unwrap(),
/// ];
/// let pool = WorkerPool::new(PoolConfig::default().with_workers(2));
/// let results = pool.run(&problems, &ExactSolver::default()).unwrap();
/// assert_eq!(results[0].solutions_count, 2);
/// assert_eq!(results[1].solutions_count, 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct WorkerPool {
    config: PoolConfig,
}

impl WorkerPool {
    /// Creates a pool with the given configuration.
    pub fn new(config: PoolConfig) -> Self {
        Self { config }
    }

    /// The pool configuration.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Solves every problem and returns one record per problem, in problem order.
    pub fn run<S: BatchSolver>(&self, problems: &[Problem], solver: &S) -> Result<Vec<S::Output>> {
        self.run_with_progress(problems, solver, &LogProgress)
    }

    /// Like [`run`](Self::run), reporting each solved problem to `progress`.
    ///
    /// Parameters are validated before any worker starts. All workers are
    /// joined before this returns, so the returned table is complete. If a
    /// worker fails, the others stop pulling new jobs and the first failure
    /// is returned.
    pub fn run_with_progress<S, P>(
        &self,
        problems: &[Problem],
        solver: &S,
        progress: &P,
    ) -> Result<Vec<S::Output>>
    where
        S: BatchSolver,
        P: Progress<S::Output>,
    {
        self.config.validate()?;
        solver.validate()?;

        let total = problems.len();
        let queue = JobQueue::seeded(total);
        let slots = Mutex::new(Slots {
            results: vec![None; total],
            completed: 0,
        });
        let abort = AtomicBool::new(false);

        let mode = <S::Output as SolveRecord>::MODE;
        info!(
            mode = %mode,
            workers = self.config.workers,
            problems = total,
            "starting worker pool"
        );

        let outcomes: Vec<Result<()>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..self.config.workers)
                .map(|worker_id| {
                    let ctx = WorkerContext {
                        worker_id,
                        seed: worker_seed(self.config.seed, worker_id),
                        problems,
                        solver,
                        progress,
                        queue: &queue,
                        slots: &slots,
                        abort: &abort,
                    };
                    scope.spawn(move || ctx.run())
                })
                .collect();

            handles
                .into_iter()
                .map(|h| {
                    h.join().unwrap_or_else(|payload| {
                        abort.store(true, Ordering::Relaxed);
                        Err(KnapsackError::Worker {
                            problem: None,
                            message: panic_message(payload.as_ref()),
                        })
                    })
                })
                .collect()
        });

        if let Some(err) = outcomes.into_iter().find_map(Result::err) {
            return Err(err);
        }

        let slots = slots.into_inner().unwrap_or_else(PoisonError::into_inner);
        slots
            .results
            .into_iter()
            .enumerate()
            .map(|(i, r)| {
                r.ok_or_else(|| KnapsackError::Worker {
                    problem: Some(i),
                    message: "no result recorded".into(),
                })
            })
            .collect()
    }
}

/// Everything one worker borrows from the pool.
struct WorkerContext<'a, S: BatchSolver, P> {
    worker_id: usize,
    seed: Option<u64>,
    problems: &'a [Problem],
    solver: &'a S,
    progress: &'a P,
    queue: &'a JobQueue,
    slots: &'a Mutex<Slots<S::Output>>,
    abort: &'a AtomicBool,
}

impl<S, P> WorkerContext<'_, S, P>
where
    S: BatchSolver,
    P: Progress<S::Output>,
{
    fn run(self) -> Result<()> {
        let mut rng = create_rng(self.seed);
        let mut solved = 0usize;

        while !self.abort.load(Ordering::Relaxed) {
            let Some(index) = self.queue.pop() else {
                break;
            };

            // Solving never holds a lock.
            let record = match self.solver.solve(index, &self.problems[index], &mut rng) {
                Ok(record) => record,
                Err(e) => {
                    self.abort.store(true, Ordering::Relaxed);
                    return Err(KnapsackError::Worker {
                        problem: Some(index),
                        message: e.to_string(),
                    });
                }
            };

            let total = self.problems.len();
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            slots.results[index] = Some(record);
            slots.completed += 1;
            let completed = slots.completed;
            if let Some(record) = slots.results[index].as_ref() {
                self.progress
                    .on_solved(index, record, completed, total, self.queue.len());
            }
            solved += 1;
        }

        debug!(worker = self.worker_id, solved, "worker finished");
        Ok(())
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "worker panicked".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exact::ExactConfig;
    use crate::ga::GaConfig;
    use crate::pool::{ExactSolver, HeuristicSolver};
    use crate::record::ExactResult;
    use rand::Rng;

    fn problems(count: usize) -> Vec<Problem> {
        (0..count)
            .map(|i| Problem::new(vec![1, 2, 3, 4, 5], (i % 16) as i64).unwrap())
            .collect()
    }

    /// Counts how often each index was reported.
    struct Counter {
        seen: Mutex<Vec<usize>>,
        max_completed: Mutex<usize>,
    }

    impl Counter {
        fn new(n: usize) -> Self {
            Self {
                seen: Mutex::new(vec![0; n]),
                max_completed: Mutex::new(0),
            }
        }
    }

    impl<T> Progress<T> for Counter {
        fn on_solved(&self, index: usize, _: &T, completed: usize, total: usize, _: usize) {
            self.seen.lock().unwrap()[index] += 1;
            let mut m = self.max_completed.lock().unwrap();
            assert!(completed <= total);
            *m = (*m).max(completed);
        }
    }

    #[test]
    fn test_every_index_solved_once() {
        let ps = problems(50);
        for workers in [1, 2, 3, 8] {
            let counter = Counter::new(ps.len());
            let pool = WorkerPool::new(PoolConfig::default().with_workers(workers));
            let results = pool
                .run_with_progress(&ps, &ExactSolver::default(), &counter)
                .unwrap();

            assert_eq!(results.len(), ps.len());
            for (i, r) in results.iter().enumerate() {
                assert_eq!(r.problem_number, i + 1);
            }
            assert!(counter.seen.lock().unwrap().iter().all(|&c| c == 1));
            assert_eq!(*counter.max_completed.lock().unwrap(), ps.len());
        }
    }

    #[test]
    fn test_results_match_sequential() {
        let ps = problems(20);
        let pool = WorkerPool::new(PoolConfig::default().with_workers(4));
        let results = pool.run(&ps, &ExactSolver::default()).unwrap();
        for (p, r) in ps.iter().zip(&results) {
            let seq = crate::exact::ExactRunner::run(p, &ExactConfig::default()).unwrap();
            assert_eq!(r.solutions_count, seq.match_count);
        }
    }

    #[test]
    fn test_empty_batch() {
        let pool = WorkerPool::new(PoolConfig::default().with_workers(4));
        let results = pool.run(&[], &ExactSolver::default()).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_more_workers_than_jobs() {
        let ps = problems(2);
        let pool = WorkerPool::new(PoolConfig::default().with_workers(16));
        assert_eq!(pool.run(&ps, &ExactSolver::default()).unwrap().len(), 2);
    }

    #[test]
    fn test_invalid_solver_rejected_before_start() {
        let ps = problems(3);
        let counter = Counter::new(ps.len());
        let pool = WorkerPool::new(PoolConfig::default().with_workers(2));
        let solver = HeuristicSolver::new(GaConfig::default().with_population_size(7));
        assert!(pool.run_with_progress(&ps, &solver, &counter).is_err());
        assert!(counter.seen.lock().unwrap().iter().all(|&c| c == 0));
    }

    #[test]
    fn test_zero_workers_rejected() {
        let pool = WorkerPool::new(PoolConfig::default().with_workers(0));
        assert!(pool.run(&problems(1), &ExactSolver::default()).is_err());
    }

    #[test]
    fn test_heuristic_batch() {
        let ps: Vec<Problem> = (0..6)
            .map(|_| Problem::new(vec![0, 0, 0], 0).unwrap())
            .collect();
        let pool = WorkerPool::new(PoolConfig::default().with_workers(3).with_seed(5));
        let solver = HeuristicSolver::new(GaConfig::default().with_population_size(4));
        let results = pool.run(&ps, &solver).unwrap();
        assert!(results.iter().all(|r| r.best_fitness == 0));
    }

    struct FailingSolver;

    impl BatchSolver for FailingSolver {
        type Output = ExactResult;

        fn solve<R: Rng>(&self, index: usize, _: &Problem, _: &mut R) -> Result<ExactResult> {
            if index == 3 {
                return Err(crate::error::DegenerateInput::ZeroWorkers.into());
            }
            Ok(ExactResult {
                problem_number: index + 1,
                first_solution_time: None,
                all_solutions_time: std::time::Duration::ZERO,
                solutions_count: 0,
            })
        }
    }

    #[test]
    fn test_worker_failure_surfaces() {
        let pool = WorkerPool::new(PoolConfig::default().with_workers(2));
        let err = pool.run(&problems(10), &FailingSolver).unwrap_err();
        assert!(matches!(err, KnapsackError::Worker { problem: Some(3), .. }));
    }

    struct PanickingSolver;

    impl BatchSolver for PanickingSolver {
        type Output = ExactResult;

        fn solve<R: Rng>(&self, _: usize, _: &Problem, _: &mut R) -> Result<ExactResult> {
            panic!("solver exploded");
        }
    }

    #[test]
    fn test_worker_panic_surfaces() {
        let pool = WorkerPool::new(PoolConfig::default().with_workers(2));
        let err = pool.run(&problems(4), &PanickingSolver).unwrap_err();
        match err {
            KnapsackError::Worker { problem: None, message } => {
                assert!(message.contains("solver exploded"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
