//! Subset-sum problem instances.
//!
//! A [`Problem`] is a list of item weights plus one target weight. On disk a
//! problem is a single comma-delimited line of integers whose last value is
//! the target.

use crate::error::{DegenerateInput, KnapsackError, Result};

/// An immutable subset-sum instance.
///
/// Always holds at least one item. Solvers borrow it read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Problem {
    weights: Vec<i64>,
    target: i64,
}

impl Problem {
    /// Creates a problem from item weights and a target.
    ///
    /// Fails with [`DegenerateInput::TooFewValues`] when `weights` is empty.
    pub fn new(weights: Vec<i64>, target: i64) -> Result<Self> {
        if weights.is_empty() {
            return Err(DegenerateInput::TooFewValues { line: 0, len: 1 }.into());
        }
        Ok(Self { weights, target })
    }

    /// Builds a problem from a flat value list whose last element is the target.
    pub fn from_values(mut values: Vec<i64>) -> Result<Self> {
        if values.len() < 2 {
            return Err(DegenerateInput::TooFewValues {
                line: 0,
                len: values.len(),
            }
            .into());
        }
        let target = values.pop().unwrap_or_default();
        Ok(Self {
            weights: values,
            target,
        })
    }

    /// Parses one comma-delimited line. `line_no` is 1-based and only used
    /// for error reporting.
    ///
    /// Tokens are trimmed; any non-integer token fails the whole line.
    pub fn parse_line(line: &str, line_no: usize) -> Result<Self> {
        let values = line
            .split(',')
            .map(|tok| {
                let tok = tok.trim();
                tok.parse::<i64>().map_err(|_| KnapsackError::Parse {
                    line: line_no,
                    token: tok.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Self::from_values(values).map_err(|e| match e {
            KnapsackError::DegenerateInput(DegenerateInput::TooFewValues { len, .. }) => {
                DegenerateInput::TooFewValues { line: line_no, len }.into()
            }
            other => other,
        })
    }

    /// Item weights, in input order.
    pub fn weights(&self) -> &[i64] {
        &self.weights
    }

    /// Target weight.
    pub fn target(&self) -> i64 {
        self.target
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Renders the problem back to its comma-delimited line form.
    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(self.weights.len() * 8);
        for w in &self.weights {
            out.push_str(&w.to_string());
            out.push(',');
        }
        out.push_str(&self.target.to_string());
        out
    }
}
