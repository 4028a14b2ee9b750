//! Random number generator construction.
//!
//! Every solver takes its generator explicitly. A generator is created once
//! per worker thread (or once per standalone run) and then reused, never
//! reseeded per call.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a generator from an optional seed.
///
/// `Some(seed)` gives a reproducible stream; `None` seeds from the OS.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Derives the seed for worker `worker_id` from a base seed.
pub fn worker_seed(base: Option<u64>, worker_id: usize) -> Option<u64> {
    base.map(|b| b.wrapping_add(worker_id as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = create_rng(Some(7));
        let mut b = create_rng(Some(7));
        let xs: Vec<u32> = (0..8).map(|_| a.random()).collect();
        let ys: Vec<u32> = (0..8).map(|_| b.random()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_worker_seed() {
        assert_eq!(worker_seed(Some(10), 3), Some(13));
        assert_eq!(worker_seed(None, 3), None);
        assert_eq!(worker_seed(Some(u64::MAX), 1), Some(0));
    }
}
