//! Worker pool configuration.

use crate::error::{DegenerateInput, Result};

/// Worker count used when the platform cannot report its parallelism.
pub const FALLBACK_WORKERS: usize = 4;

/// Configuration for the worker pool.
///
/// ```
/// use u_knapsack::pool::PoolConfig;
///
/// let config = PoolConfig::default().with_workers(2).with_seed(7);
/// assert_eq!(config.workers, 2);
/// assert_eq!(config.seed, Some(7));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolConfig {
    /// Number of worker threads spawned per batch.
    pub workers: usize,

    /// Base random seed. Worker `k` seeds its generator with `seed + k`;
    /// `None` seeds every worker from the OS.
    pub seed: Option<u64>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            workers: hardware_concurrency(),
            seed: None,
        }
    }
}

impl PoolConfig {
    /// Sets the number of workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Sets the number of workers from an `Option`; `None` keeps the current value.
    pub fn with_workers_option(mut self, workers: Option<usize>) -> Self {
        if let Some(w) = workers {
            self.workers = w;
        }
        self
    }

    /// Sets the base random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the base random seed from an `Option`.
    pub fn with_seed_option(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(DegenerateInput::ZeroWorkers.into());
        }
        Ok(())
    }
}

/// Reported hardware concurrency, or [`FALLBACK_WORKERS`].
pub fn hardware_concurrency() -> usize {
    std::thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_hardware() {
        let config = PoolConfig::default();
        assert!(config.workers >= 1);
        assert_eq!(config.workers, hardware_concurrency());
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        assert!(PoolConfig::default().with_workers(0).validate().is_err());
    }

    #[test]
    fn test_option_setters() {
        let c = PoolConfig::default()
            .with_workers(3)
            .with_workers_option(None)
            .with_seed_option(Some(5));
        assert_eq!(c.workers, 3);
        assert_eq!(c.seed, Some(5));
        assert_eq!(c.with_workers_option(Some(6)).workers, 6);
    }
}
