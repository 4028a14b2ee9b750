//! Exhaustive subset enumeration.
//!
//! Walks every non-empty subset of the items exactly once, grouped by subset
//! size, and counts those whose weight sum equals the target. Sums may
//! optionally be reduced modulo a fixed modulus before comparison.
//!
//! This is a brute-force reference oracle: `O(2^n · n)` by construction.
//!
//! # Key Types
//!
//! - [`ExactConfig`]: optional modulus
//! - [`ExactRunner`]: runs the enumeration and times it
//! - [`ExactOutcome`]: match count plus first-hit and exhaustive timings
//!
//! # Submodules
//!
//! - [`combination`]: indicator-vector predecessor walk

pub mod combination;
mod config;
mod runner;

pub use config::ExactConfig;
pub use runner::{reduce, solve_exact, ExactOutcome, ExactRunner};
