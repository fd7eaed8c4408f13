//! Sharing parameters: the field prime and the threshold configuration.

use std::fmt;

use math::{BigUint, PrimeField};

use crate::error::{ParameterError, Result};

/// Largest number of shares a single split may produce.
pub const MAX_SHARES: u32 = 255;

/// Default field prime, the 12th Mersenne prime `2^127 - 1`.
pub const MERSENNE_127: u128 = (1 << 127) - 1;

/// The prime field every sharing operation runs in.
///
/// Shares produced under one prime are meaningless under another, so the
/// value is passed explicitly rather than read from global state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SharingConfig {
    field: PrimeField,
}

impl SharingConfig {
    /// Build a configuration around `prime`.
    ///
    /// The prime must exceed [`MAX_SHARES`] so that share indices are
    /// distinct field elements. Primality itself is not checked.
    pub fn new(prime: BigUint) -> Result<Self> {
        if prime <= BigUint::from(MAX_SHARES) {
            return Err(ParameterError::PrimeTooSmall.into());
        }
        Ok(Self {
            field: PrimeField::new(prime)?,
        })
    }

    pub fn prime(&self) -> &BigUint {
        self.field.modulus()
    }

    pub fn field(&self) -> &PrimeField {
        &self.field
    }
}

impl Default for SharingConfig {
    fn default() -> Self {
        let field = PrimeField::new(BigUint::from(MERSENNE_127))
            .unwrap_or_else(|_| unreachable!("2^127 - 1 is a valid modulus"));
        Self { field }
    }
}

/// A validated `threshold`-of-`total` configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdConfig {
    pub threshold: u32,
    pub total: u32,
}

impl ThresholdConfig {
    pub fn new(threshold: u32, total: u32) -> Result<Self, ParameterError> {
        validate_threshold_config(threshold, total)?;
        Ok(Self { threshold, total })
    }
}

impl fmt::Display for ThresholdConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-of-{}", self.threshold, self.total)
    }
}

/// Check `1 <= threshold <= total <= MAX_SHARES`.
pub fn validate_threshold_config(
    threshold: u32,
    total: u32,
) -> Result<(), ParameterError> {
    match (threshold, total) {
        (0, _) => Err(ParameterError::ZeroThreshold),
        (_, 0) => Err(ParameterError::ZeroTotal),
        (t, n) if t > n => {
            Err(ParameterError::ThresholdExceedsTotal { threshold, total })
        }
        (_, n) if n > MAX_SHARES => Err(ParameterError::TooManyShares(n)),
        _ => Ok(()),
    }
}
