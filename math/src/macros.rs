//! Shared macros for constructing core math primitives.

/// Construct a [`Polynomial`](crate::poly::Polynomial) from unsigned integer
/// coefficients, lowest degree first.
///
/// ```
/// use math::prelude::*;
///
/// let poly = poly![1, 2, 3];
/// assert_eq!(poly.coefficients(), &[BigUint::from(1u8), BigUint::from(2u8), BigUint::from(3u8)]);
/// ```
#[macro_export]
macro_rules! poly {
    () => {{
        $crate::poly::Polynomial::zero()
    }};
    ($val:expr; $count:expr) => {{
        let value = $crate::BigUint::from(($val) as u64);
        $crate::poly::Polynomial::from(vec![value; $count])
    }};
    ($($coeff:expr),+ $(,)?) => {{
        $crate::poly::Polynomial::from(vec![$($crate::BigUint::from(($coeff) as u64)),+])
    }};
}
