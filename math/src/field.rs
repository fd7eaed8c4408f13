//! Modular arithmetic over a prime field `Z_p`.
//!
//! Elements are plain [`BigUint`]s kept in `[0, p)`. Intermediate values that
//! may go negative (differences of abscissas during interpolation) are
//! carried as [`BigInt`] and normalized with a Euclidean remainder.

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};

use crate::error::{MathError, Result};

/// Run the extended Euclidean algorithm on `(a, b)`.
///
/// Returns `(g, x, y)` with `a*x + b*y == g == gcd(a, b)`.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_x, mut x) = (BigInt::one(), BigInt::zero());
    let (mut old_y, mut y) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let quotient = &old_r / &r;

        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_x = &old_x - &quotient * &x;
        old_x = std::mem::replace(&mut x, next_x);

        let next_y = &old_y - &quotient * &y;
        old_y = std::mem::replace(&mut y, next_y);
    }

    (old_r, old_x, old_y)
}

/// Reduce a signed value into `[0, p)`.
fn normalize(value: &BigInt, modulus: &BigInt) -> BigUint {
    let mut remainder = value % modulus;
    if remainder.is_negative() {
        remainder += modulus;
    }
    remainder.into_parts().1
}

fn check_modulus(p: &BigUint) -> Result<()> {
    if p < &BigUint::from(2u8) {
        return Err(MathError::InvalidModulus);
    }
    Ok(())
}

/// Compute `b` such that `a * b ≡ 1 (mod p)`.
///
/// Fails with [`MathError::NotInvertible`] when `gcd(a, p) != 1`, which for a
/// prime `p` means `a ≡ 0 (mod p)`.
pub fn modular_inverse(a: &BigInt, p: &BigUint) -> Result<BigUint> {
    check_modulus(p)?;
    let modulus = BigInt::from(p.clone());
    let reduced = BigInt::from(normalize(a, &modulus));

    let (gcd, x, _) = extended_gcd(&reduced, &modulus);
    if !gcd.is_one() {
        return Err(MathError::NotInvertible);
    }
    Ok(normalize(&x, &modulus))
}

/// Compute `numerator / denominator (mod p)`, fully reduced into `[0, p)`.
pub fn modular_divide(
    numerator: &BigInt,
    denominator: &BigInt,
    p: &BigUint,
) -> Result<BigUint> {
    let inverse = BigInt::from(modular_inverse(denominator, p)?);
    let modulus = BigInt::from(p.clone());
    Ok(normalize(&(numerator * inverse), &modulus))
}

/// The prime field `Z_p`.
///
/// Primality of the modulus is the caller's responsibility; only `p >= 2` is
/// checked.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PrimeField {
    modulus: BigUint,
    signed_modulus: BigInt,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Result<Self> {
        check_modulus(&modulus)?;
        let signed_modulus = BigInt::from(modulus.clone());
        Ok(Self {
            modulus,
            signed_modulus,
        })
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Whether `value` is a canonical element, i.e. lies in `[0, p)`.
    pub fn contains(&self, value: &BigUint) -> bool {
        value < &self.modulus
    }

    pub fn reduce(&self, value: &BigInt) -> BigUint {
        normalize(value, &self.signed_modulus)
    }

    pub fn reduce_unsigned(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = BigInt::from(a.clone());
        let b = BigInt::from(b.clone());
        self.reduce(&(a - b))
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn inverse(&self, a: &BigInt) -> Result<BigUint> {
        modular_inverse(a, &self.modulus)
    }

    pub fn divide(
        &self,
        numerator: &BigInt,
        denominator: &BigInt,
    ) -> Result<BigUint> {
        let inverse = BigInt::from(self.inverse(denominator)?);
        Ok(self.reduce(&(numerator * inverse)))
    }
}
