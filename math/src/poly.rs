//! Dense univariate polynomials over `Z_p`.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::field::PrimeField;

/// Evaluate `c0 + c1*x + ... + cn*x^n (mod p)` with Horner's method.
///
/// Coefficients are ordered lowest degree first. The result lies in
/// `[0, p)`; an empty coefficient list evaluates to zero.
///
/// # Panics
///
/// Panics if `p` is zero.
pub fn evaluate(coefficients: &[BigUint], x: &BigUint, p: &BigUint) -> BigUint {
    coefficients
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, coeff| (acc * x + coeff) % p)
}

/// A polynomial with coefficients stored lowest degree first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Polynomial {
    coefficients: Vec<BigUint>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<BigUint>) -> Self {
        Self { coefficients }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn coefficients(&self) -> &[BigUint] {
        &self.coefficients
    }

    /// Value at `x = 0`.
    pub fn constant_term(&self) -> BigUint {
        self.coefficients.first().cloned().unwrap_or_default()
    }

    /// Index of the highest non-zero coefficient, `None` for the zero
    /// polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.iter().rposition(|c| !c.is_zero())
    }

    pub fn evaluate(&self, x: &BigUint, field: &PrimeField) -> BigUint {
        evaluate(&self.coefficients, x, field.modulus())
    }
}

impl From<Vec<BigUint>> for Polynomial {
    fn from(coefficients: Vec<BigUint>) -> Self {
        Self::new(coefficients)
    }
}
