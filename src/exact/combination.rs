//! Indicator-vector walk over fixed-size combinations.
//!
//! A combination of `r` items out of `n` is encoded as an indicator vector
//! with exactly `r` positions set. Starting from the canonical vector (first
//! `r` positions set), repeatedly stepping to the lexicographic predecessor
//! visits every `r`-combination exactly once in descending order and stops
//! at the vector with the last `r` positions set.
//!
//! # Complexity
//! O(n) per step, `C(n, r)` steps.

/// Rearranges `v` into its immediate lexicographic predecessor.
///
/// Returns `false` (and leaves `v` as its largest permutation, i.e. sorted
/// descending) when `v` was already the smallest permutation.
pub fn prev_permutation<T: Ord>(v: &mut [T]) -> bool {
    let n = v.len();
    if n < 2 {
        return false;
    }

    // Longest non-decreasing suffix starts at `i`.
    let mut i = n - 1;
    while i > 0 && v[i - 1] <= v[i] {
        i -= 1;
    }
    if i == 0 {
        v.reverse();
        return false;
    }

    // Rightmost element in the suffix smaller than the pivot.
    let mut j = n - 1;
    while v[j] >= v[i - 1] {
        j -= 1;
    }
    v.swap(i - 1, j);
    v[i..].reverse();
    true
}

/// The canonical starting vector for size `r`: first `r` positions set.
///
/// `r` is clamped to `n`.
pub fn canonical(n: usize, r: usize) -> Vec<bool> {
    let r = r.min(n);
    let mut v = vec![false; n];
    v[..r].fill(true);
    v
}

/// Calls `visit` once for every `r`-combination of `n` items, in
/// descending lexicographic order of the indicator vector.
///
/// `visit` returns nothing; the walk always runs to completion.
pub fn for_each_combination<F>(n: usize, r: usize, mut visit: F)
where
    F: FnMut(&[bool]),
{
    if r > n {
        return;
    }
    let mut bits = canonical(n, r);
    loop {
        visit(&bits);
        if !prev_permutation(&mut bits) {
            break;
        }
    }
}

/// Binomial coefficient `C(n, r)`, saturating at `u64::MAX`.
pub fn binomial(n: u64, r: u64) -> u64 {
    if r > n {
        return 0;
    }
    let r = r.min(n - r);
    let mut acc: u128 = 1;
    for k in 0..r {
        acc = acc * u128::from(n - k) / u128::from(k + 1);
        if acc > u128::from(u64::MAX) {
            return u64::MAX;
        }
    }
    acc as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_prev_permutation_sequence() {
        let mut v = vec![true, true, false, false];
        let mut seen = vec![v.clone()];
        while prev_permutation(&mut v) {
            seen.push(v.clone());
        }
        assert_eq!(
            seen,
            vec![
                vec![true, true, false, false],
                vec![true, false, true, false],
                vec![true, false, false, true],
                vec![false, true, true, false],
                vec![false, true, false, true],
                vec![false, false, true, true],
            ]
        );
        // Wrapped around to the largest permutation.
        assert_eq!(v, vec![true, true, false, false]);
    }

    #[test]
    fn test_prev_permutation_integers() {
        let mut v = vec![3, 1, 2];
        assert!(prev_permutation(&mut v));
        assert_eq!(v, vec![2, 3, 1]);
        let mut smallest = vec![1, 2, 3];
        assert!(!prev_permutation(&mut smallest));
        assert_eq!(smallest, vec![3, 2, 1]);
    }

    #[test]
    fn test_trivial_lengths() {
        let mut empty: Vec<bool> = vec![];
        assert!(!prev_permutation(&mut empty));
        let mut one = vec![true];
        assert!(!prev_permutation(&mut one));
    }

    #[test]
    fn test_every_combination_once() {
        for n in 1..=8usize {
            for r in 1..=n {
                let mut seen = HashSet::new();
                for_each_combination(n, r, |bits| {
                    assert_eq!(bits.iter().filter(|&&b| b).count(), r);
                    assert!(seen.insert(bits.to_vec()), "duplicate combination");
                });
                assert_eq!(seen.len() as u64, binomial(n as u64, r as u64));
            }
        }
    }

    #[test]
    fn test_r_larger_than_n_visits_nothing() {
        let mut count = 0;
        for_each_combination(3, 4, |_| count += 1);
        assert_eq!(count, 0);
    }

    #[test]
    fn test_binomial() {
        assert_eq!(binomial(4, 2), 6);
        assert_eq!(binomial(24, 12), 2_704_156);
        assert_eq!(binomial(3, 5), 0);
        assert_eq!(binomial(10, 0), 1);
    }
}
