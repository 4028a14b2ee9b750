//! Parallel subset-sum benchmarking engine.
//!
//! Given item weights and a target weight, finds the subsets of items that
//! sum to the target and measures how long that takes. Two solver families
//! are provided:
//!
//! - **Exact**: walks every non-empty subset once, grouped by size, and
//!   reports the match count, the time to the first match and the time to
//!   exhaust the search. Sums may be reduced modulo a fixed modulus.
//! - **Heuristic**: a genetic algorithm over inclusion vectors with
//!   tournament selection, one-point crossover and bit-flip mutation,
//!   stopped by an exact match, a stall limit, a time budget or a
//!   generation cap.
//!
//! Many independent problems are solved concurrently by a [`pool::WorkerPool`]
//! that hands out problem indices from a mutex-guarded queue; the
//! [`report`] module aggregates the completed result table and the
//! [`batch`] module drives load → solve → aggregate → persist per input file.
//!
//! # Example
//!
//! ```
//! use u_knapsack::exact::solve_exact;
//!
//! let outcome = solve_exact(&[1, 2, 3, 4], 5, None).unwrap();
//! assert_eq!(outcome.match_count, 2); // {1, 4} and {2, 3}
//! assert!(outcome.time_to_first.is_some());
//! ```
//!
//! # Architecture
//!
//! Solvers are pure functions of a borrowed [`Problem`] plus, for the GA,
//! an explicitly passed random generator. Only the [`pool`] module spawns
//! threads, and only the binary installs a `tracing` subscriber.

pub mod batch;
pub mod error;
pub mod exact;
pub mod ga;
pub mod generate;
pub mod io;
pub mod pool;
pub mod problem;
pub mod random;
pub mod record;
pub mod report;

pub use error::{KnapsackError, Result};
pub use problem::Problem;
