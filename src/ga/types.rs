//! Chromosome representation for the subset-sum GA.
//!
//! A [`Chromosome`] is an indicator vector over the items together with its
//! cached fitness. Fitness is the absolute distance between the selected
//! weight sum and the target: lower is better, `0` is an exact match.

use rand::Rng;

/// Fitness of an unevaluated chromosome.
pub const UNEVALUATED: u64 = u64::MAX;

/// A candidate subset in the GA population.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Chromosome {
    /// Item inclusion flags, one per weight.
    pub genes: Vec<bool>,
    fitness: u64,
}

impl Chromosome {
    /// Wraps an indicator vector; fitness starts as [`UNEVALUATED`].
    pub fn new(genes: Vec<bool>) -> Self {
        Self {
            genes,
            fitness: UNEVALUATED,
        }
    }

    /// Draws every bit independently and uniformly.
    pub fn random<R: Rng>(n: usize, rng: &mut R) -> Self {
        Self::new((0..n).map(|_| rng.random_bool(0.5)).collect())
    }

    /// Cached fitness from the last [`evaluate`](Self::evaluate).
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Recomputes and caches the fitness.
    pub fn evaluate(&mut self, weights: &[i64], target: i64) -> u64 {
        self.fitness = subset_fitness(&self.genes, weights, target);
        self.fitness
    }

    /// Indices of the selected items.
    pub fn selected(&self) -> Vec<usize> {
        self.genes
            .iter()
            .enumerate()
            .filter_map(|(i, &g)| g.then_some(i))
            .collect()
    }
}

/// `|target − Σ selected weights|`, with the sum taken in fixed-width `i64`.
pub fn subset_fitness(genes: &[bool], weights: &[i64], target: i64) -> u64 {
    let sum = genes
        .iter()
        .zip(weights)
        .filter(|&(&g, _)| g)
        .fold(0i64, |acc, (_, &w)| acc.wrapping_add(w));
    target.abs_diff(sum)
}
