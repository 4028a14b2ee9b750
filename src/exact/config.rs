//! Exact enumeration configuration.

use crate::error::{DegenerateInput, Result};

/// Configuration for the exhaustive enumerator.
///
/// ```
/// use u_knapsack::exact::ExactConfig;
///
/// let plain = ExactConfig::default();
/// assert!(plain.modulus.is_none());
///
/// let wrapped = ExactConfig::default().with_modulus(1 << 24);
/// assert_eq!(wrapped.modulus, Some(16_777_216));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExactConfig {
    /// When set, both the running sum and the target are reduced modulo this
    /// value (non-negative remainder) before comparison.
    pub modulus: Option<i64>,
}

impl ExactConfig {
    /// Sets the modulus.
    pub fn with_modulus(mut self, modulus: i64) -> Self {
        self.modulus = Some(modulus);
        self
    }

    /// Sets the modulus from an `Option`.
    pub fn with_modulus_option(mut self, modulus: Option<i64>) -> Self {
        self.modulus = modulus;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        match self.modulus {
            Some(m) if m <= 0 => Err(DegenerateInput::NonPositiveModulus(m).into()),
            _ => Ok(()),
        }
    }
}
