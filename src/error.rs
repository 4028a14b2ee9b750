//! Error taxonomy shared by the solvers, the worker pool and the batch driver.

use std::fmt;
use std::path::PathBuf;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, KnapsackError>;

/// Reasons an input or a parameter set cannot be solved.
///
/// These are detected before any solve starts; a solver never observes a
/// degenerate input mid-run.
#[derive(Debug, Clone, PartialEq)]
pub enum DegenerateInput {
    /// A problem line carried fewer than two values (at least one item plus a target).
    TooFewValues {
        /// 1-based line number, or 0 when the problem was built in memory.
        line: usize,
        /// Number of values found.
        len: usize,
    },
    /// Population smaller than two individuals.
    EmptyPopulation,
    /// Odd population sizes shrink every generation under pairwise reproduction.
    OddPopulation(usize),
    /// Tournament of size zero cannot select anything.
    ZeroTournament,
    /// `max_generations` must be at least one.
    ZeroGenerations,
    /// Time budget of zero would stop before the first evaluation.
    ZeroTimeBudget,
    /// Mutation rate outside `[0, 1]` or not finite.
    MutationRate(f64),
    /// Modulus must be strictly positive.
    NonPositiveModulus(i64),
    /// Worker pool of size zero.
    ZeroWorkers,
    /// A generator bound is empty or inverted.
    InvalidRange(&'static str),
}

impl fmt::Display for DegenerateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewValues { line, len } => write!(
                f,
                "problem on line {line} has {len} value(s); need at least one item and a target"
            ),
            Self::EmptyPopulation => write!(f, "population_size must be at least 2"),
            Self::OddPopulation(n) => write!(f, "population_size must be even, got {n}"),
            Self::ZeroTournament => write!(f, "tournament_size must be at least 1"),
            Self::ZeroGenerations => write!(f, "max_generations must be at least 1"),
            Self::ZeroTimeBudget => write!(f, "time_budget must be positive"),
            Self::MutationRate(r) => write!(f, "mutation_rate must lie in [0, 1], got {r}"),
            Self::NonPositiveModulus(m) => write!(f, "modulus must be positive, got {m}"),
            Self::ZeroWorkers => write!(f, "worker pool needs at least one worker"),
            Self::InvalidRange(name) => write!(f, "{name} is empty or inverted"),
        }
    }
}

/// The error type for loading, solving and persisting batches.
#[derive(Debug)]
pub enum KnapsackError {
    /// A source could not be read or a destination could not be written.
    Io {
        /// File involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A token in a problem line is not an integer.
    Parse {
        /// 1-based line number.
        line: usize,
        /// The offending token.
        token: String,
    },
    /// Input or parameters that make the solve undefined.
    DegenerateInput(DegenerateInput),
    /// A worker failed while solving a problem.
    Worker {
        /// 0-based problem index, when known.
        problem: Option<usize>,
        /// Description of the failure.
        message: String,
    },
}

impl KnapsackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for KnapsackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "I/O error on {}: {source}", path.display()),
            Self::Parse { line, token } => {
                write!(f, "line {line}: could not parse token '{token}' as i64")
            }
            Self::DegenerateInput(d) => write!(f, "degenerate input: {d}"),
            Self::Worker {
                problem: Some(i),
                message,
            } => write!(f, "worker failed on problem {}: {message}", i + 1),
            Self::Worker {
                problem: None,
                message,
            } => write!(f, "worker failed: {message}"),
        }
    }
}

impl std::error::Error for KnapsackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<DegenerateInput> for KnapsackError {
    fn from(d: DegenerateInput) -> Self {
        Self::DegenerateInput(d)
    }
}
