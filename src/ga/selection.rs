//! Tournament selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use super::types::Chromosome;
use rand::Rng;

/// Picks `k` indices uniformly with replacement and returns the one with the
/// lowest fitness. Ties go to the candidate drawn first.
///
/// # Panics
/// Panics if `population` is empty.
///
/// # Complexity
/// O(k)
pub fn tournament<R: Rng>(population: &[Chromosome], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Runs one independent tournament per output slot, producing a selection
/// the same size as `population`.
pub fn select_population<R: Rng>(
    population: &[Chromosome],
    k: usize,
    rng: &mut R,
) -> Vec<Chromosome> {
    (0..population.len())
        .map(|_| population[tournament(population, k, rng)].clone())
        .collect()
}
