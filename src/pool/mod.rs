//! Parallel batch execution.
//!
//! A batch is a list of problems solved by one [`BatchSolver`]. The
//! [`WorkerPool`] seeds a [`JobQueue`] with every problem index, spawns a
//! fixed number of worker threads and collects exactly one record per
//! problem.
//!
//! # Components
//!
//! - [`PoolConfig`]: worker count and base seed
//! - [`JobQueue`]: mutex-guarded FIFO of problem indices
//! - [`BatchSolver`]: the per-problem solve step, implemented by
//!   [`ExactSolver`] and [`HeuristicSolver`]
//! - [`Progress`]: per-problem observer; [`LogProgress`] emits `tracing` events
//!
//! # Concurrency
//!
//! Solving happens outside every lock. The queue lock is held only to pop an
//! index, and the result lock only to store a record and report progress.
//! Each worker owns its random generator, seeded from the base seed plus
//! the worker id.

mod config;
mod queue;
mod runner;
mod solver;

pub use config::{hardware_concurrency, PoolConfig, FALLBACK_WORKERS};
pub use queue::JobQueue;
pub use runner::{LogProgress, Progress, WorkerPool};
pub use solver::{BatchSolver, ExactSolver, HeuristicSolver};
