//! Benchmark problem generator.
//!
//! Draws random weight vectors, then derives several problems from each
//! vector whose target is the sum of a random non-empty subset of its items.
//! Every generated problem therefore has at least one solution, under the
//! same modulus when one is set.

use crate::batch::modulus_for_density;
use crate::error::{DegenerateInput, Result};
use crate::exact::reduce;
use crate::problem::Problem;
use rand::seq::index::sample;
use rand::Rng;

/// Generator parameters.
///
/// ```
/// use u_knapsack::generate::GeneratorConfig;
///
/// let config = GeneratorConfig::default().with_vectors(5).with_density(1.4);
/// assert_eq!(config.vector_count, 5);
/// assert_eq!(config.max_weight, 144_715);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratorConfig {
    /// Number of weight vectors.
    pub vector_count: usize,
    /// Items per vector.
    pub length: usize,
    /// Smallest weight, inclusive.
    pub min_weight: i64,
    /// Largest weight, inclusive.
    pub max_weight: i64,
    /// Fewest problems derived from one vector.
    pub min_problems: usize,
    /// Most problems derived from one vector.
    pub max_problems: usize,
    /// Lower bound of the fraction of items summed into a target.
    pub min_ratio: f64,
    /// Upper bound of that fraction.
    pub max_ratio: f64,
    /// Targets are reduced modulo this value when set.
    pub modulus: Option<i64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            vector_count: 50,
            length: 24,
            min_weight: 1,
            max_weight: 1 << 30,
            min_problems: 10,
            max_problems: 20,
            min_ratio: 0.1,
            max_ratio: 0.5,
            modulus: None,
        }
    }
}

impl GeneratorConfig {
    /// Sets the number of vectors.
    pub fn with_vectors(mut self, count: usize) -> Self {
        self.vector_count = count;
        self
    }

    /// Sets the number of items per vector.
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    /// Sets the inclusive weight range.
    pub fn with_weight_range(mut self, min: i64, max: i64) -> Self {
        self.min_weight = min;
        self.max_weight = max;
        self
    }

    /// Sets the inclusive range of problems per vector.
    pub fn with_problems_per_vector(mut self, min: usize, max: usize) -> Self {
        self.min_problems = min;
        self.max_problems = max;
        self
    }

    /// Sets the range of the selected-item fraction.
    pub fn with_ratio_range(mut self, min: f64, max: f64) -> Self {
        self.min_ratio = min;
        self.max_ratio = max;
        self
    }

    /// Sets the target modulus.
    pub fn with_modulus(mut self, modulus: i64) -> Self {
        self.modulus = Some(modulus);
        self
    }

    /// Caps weights at, and reduces targets modulo, the density's modulus.
    pub fn with_density(mut self, density: f64) -> Self {
        let m = modulus_for_density(density);
        self.max_weight = m;
        self.modulus = Some(m);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(DegenerateInput::TooFewValues { line: 0, len: 1 }.into());
        }
        if self.min_weight > self.max_weight {
            return Err(DegenerateInput::InvalidRange("weight range").into());
        }
        if self.min_problems > self.max_problems {
            return Err(DegenerateInput::InvalidRange("problems per vector").into());
        }
        let ratios_ok = (0.0..=1.0).contains(&self.min_ratio)
            && (0.0..=1.0).contains(&self.max_ratio)
            && self.min_ratio <= self.max_ratio;
        if !ratios_ok {
            return Err(DegenerateInput::InvalidRange("selection ratio").into());
        }
        if let Some(m) = self.modulus {
            if m <= 0 {
                return Err(DegenerateInput::NonPositiveModulus(m).into());
            }
        }
        Ok(())
    }
}

/// Draws `count` vectors of `length` weights, each uniform in
/// `[min_weight, max_weight]`.
///
/// # Panics
///
/// Panics if `min_weight > max_weight`.
pub fn generate_vectors<R: Rng>(
    count: usize,
    length: usize,
    min_weight: i64,
    max_weight: i64,
    rng: &mut R,
) -> Vec<Vec<i64>> {
    (0..count)
        .map(|_| {
            (0..length)
                .map(|_| rng.random_range(min_weight..=max_weight))
                .collect()
        })
        .collect()
}

/// Derives problems from each vector.
///
/// Each vector yields between `min_problems` and `max_problems` problems.
/// A problem picks `floor(len · U(min_ratio, max_ratio))` distinct items, at
/// least one, and uses their sum, reduced by `config.modulus` when set, as
/// its target.
pub fn generate_problems<R: Rng>(
    vectors: &[Vec<i64>],
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<Vec<Problem>> {
    config.validate()?;
    let mut problems = Vec::new();

    for vector in vectors {
        let per_vector = rng.random_range(config.min_problems..=config.max_problems);
        for _ in 0..per_vector {
            let fraction = rng.random_range(config.min_ratio..=config.max_ratio);
            let k = ((vector.len() as f64 * fraction).floor() as usize).clamp(1, vector.len());
            let sum: i128 = sample(rng, vector.len(), k)
                .iter()
                .map(|i| i128::from(vector[i]))
                .sum();
            let target = match config.modulus {
                Some(m) => reduce(sum, m),
                None => sum as i64,
            };
            problems.push(Problem::new(vector.clone(), target)?);
        }
    }
    Ok(problems)
}

/// Generates vectors and their problems in one go.
pub fn generate<R: Rng>(
    config: &GeneratorConfig,
    rng: &mut R,
) -> Result<(Vec<Vec<i64>>, Vec<Problem>)> {
    config.validate()?;
    let vectors = generate_vectors(
        config.vector_count,
        config.length,
        config.min_weight,
        config.max_weight,
        rng,
    );
    let problems = generate_problems(&vectors, config, rng)?;
    Ok((vectors, problems))
}
