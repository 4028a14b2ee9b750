//! Binary-string genetic operators.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: swap tails after a random cut point, O(n)
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: flip each bit independently with a fixed
//!   probability, O(n)
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*

use super::types::Chromosome;
use rand::Rng;

/// One-point crossover.
///
/// Draws a cut point uniformly in `[1, n-1]` and returns two children:
/// `parent1[..cut] ++ parent2[cut..]` and `parent2[..cut] ++ parent1[cut..]`.
///
/// With fewer than two genes there is no interior cut point; the children
/// are plain copies of the parents.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn one_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..n);
    (splice(parent1, parent2, cut), splice(parent2, parent1, cut))
}

/// `head[..cut] ++ tail[cut..]`
fn splice(head: &[bool], tail: &[bool], cut: usize) -> Vec<bool> {
    let mut child = Vec::with_capacity(head.len());
    child.extend_from_slice(&head[..cut]);
    child.extend_from_slice(&tail[cut..]);
    child
}

/// Flips every bit independently with probability `rate`.
///
/// `rate` must lie in `[0, 1]`; [`GaConfig::validate`](super::GaConfig::validate)
/// guarantees this for runner-driven calls.
pub fn bit_flip_mutation<R: Rng>(genes: &mut [bool], rate: f64, rng: &mut R) {
    for g in genes.iter_mut() {
        if rng.random_bool(rate) {
            *g = !*g;
        }
    }
}

/// Pairs selected individuals `(2i, 2i+1)`, crosses each pair and mutates
/// both children. A trailing unpaired individual is dropped.
pub fn reproduce<R: Rng>(selected: &[Chromosome], mutation_rate: f64, rng: &mut R) -> Vec<Chromosome> {
    let mut next = Vec::with_capacity(selected.len());
    for pair in selected.chunks_exact(2) {
        let (mut c1, mut c2) = one_point_crossover(&pair[0].genes, &pair[1].genes, rng);
        bit_flip_mutation(&mut c1, mutation_rate, rng);
        bit_flip_mutation(&mut c2, mutation_rate, rng);
        next.push(Chromosome::new(c1));
        next.push(Chromosome::new(c2));
    }
    next
}
