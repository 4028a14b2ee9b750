//! Aggregation and rendering of batch results.
//!
//! Everything here is read-only over a completed result table: the worker
//! pool has joined before any of these functions see the records.

mod compare;
mod render;
mod summary;

pub use compare::{compare, Comparison};
pub use render::{render_csv, render_table};
pub use summary::{BatchSummary, TimingStats};
