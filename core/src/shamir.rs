use std::collections::HashSet;

use math::{BigInt, BigUint, Polynomial};
use num_traits::{One, Zero};
use rand::{CryptoRng, Rng};
use tracing::debug;

use crate::{
    codec::{encode_share, EncodedShare},
    error::{ParameterError, Result, SharingError},
    params::{SharingConfig, ThresholdConfig},
    traits::PointSource,
    utils::random_field_element,
};

/// One point `(index, f(index))` of a sharing polynomial.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SharePoint {
    pub index: u32,
    pub value: BigUint,
}

impl SharePoint {
    pub fn new(index: u32, value: BigUint) -> Self {
        Self { index, value }
    }
}

impl PointSource for SharePoint {
    fn x(&self) -> u32 {
        self.index
    }

    fn y(&self) -> &BigUint {
        &self.value
    }
}

/// Shamir's secret sharing for a fixed `threshold`-of-`total` configuration.
#[derive(Clone, Debug)]
pub struct ShamirSSS {
    params: ThresholdConfig,
    config: SharingConfig,
}

impl ShamirSSS {
    pub fn new(
        threshold: u32,
        total: u32,
        config: SharingConfig,
    ) -> Result<Self> {
        let params = ThresholdConfig::new(threshold, total)?;
        Ok(Self { params, config })
    }

    pub fn threshold(&self) -> u32 {
        self.params.threshold
    }

    pub fn total(&self) -> u32 {
        self.params.total
    }

    pub fn params(&self) -> ThresholdConfig {
        self.params
    }

    pub fn config(&self) -> &SharingConfig {
        &self.config
    }

    /// Split `secret` into `total` points with indices `1..=total`.
    ///
    /// Random coefficients are drawn from `rng`, which must be a
    /// cryptographically secure generator.
    pub fn split_secret<R>(
        &self,
        secret: &BigUint,
        rng: &mut R,
    ) -> Result<Vec<SharePoint>>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        if !self.config.field().contains(secret) {
            return Err(ParameterError::SecretOutOfRange.into());
        }
        debug!(
            threshold = self.params.threshold,
            total = self.params.total,
            "splitting secret"
        );

        let polynomial = self.create_shamir_polynomial_with(rng, secret);
        let field = self.config.field();
        let points = (1..=self.params.total)
            .map(|index| {
                let value = polynomial.evaluate(&BigUint::from(index), field);
                SharePoint::new(index, value)
            })
            .collect();
        Ok(points)
    }

    /// Split `secret` and wrap every point into a self-describing token.
    pub fn split_encoded<R>(
        &self,
        secret: &BigUint,
        rng: &mut R,
    ) -> Result<Vec<EncodedShare>>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        self.split_secret(secret, rng)?
            .iter()
            .map(|point| {
                encode_share(
                    self.params.total,
                    self.params.threshold,
                    point.index,
                    &point.value,
                )
            })
            .collect()
    }

    /// Recover the secret from the first `threshold` of `points`.
    pub fn reconstruct_secret<P: PointSource>(
        &self,
        points: &[P],
    ) -> Result<BigUint> {
        let required = self.params.threshold as usize;
        if points.len() < required {
            return Err(SharingError::InsufficientShares {
                required: self.params.threshold,
                provided: points.len() as u32,
            });
        }
        reconstruct(&points[..required], &self.config)
    }

    fn create_shamir_polynomial_with<R>(
        &self,
        rng: &mut R,
        secret: &BigUint,
    ) -> Polynomial
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let field = self.config.field();
        let coefficients: Vec<BigUint> = std::iter::once(secret.clone())
            .chain(
                std::iter::repeat_with(|| random_field_element(&mut *rng, field))
                    .take(self.params.threshold.saturating_sub(1) as usize),
            )
            .collect();
        Polynomial::from(coefficients)
    }
}

/// Split `secret` into `total` points, any `threshold` of which recover it.
pub fn split<R>(
    secret: &BigUint,
    threshold: u32,
    total: u32,
    config: &SharingConfig,
    rng: &mut R,
) -> Result<Vec<SharePoint>>
where
    R: Rng + CryptoRng + ?Sized,
{
    ShamirSSS::new(threshold, total, config.clone())?.split_secret(secret, rng)
}

/// [`split`] using the thread-local CSPRNG.
pub fn split_secure(
    secret: &BigUint,
    threshold: u32,
    total: u32,
    config: &SharingConfig,
) -> Result<Vec<SharePoint>> {
    split(secret, threshold, total, config, &mut rand::rng())
}

/// Recover the polynomial's value at zero from `points`.
///
/// All points take part in the interpolation. With fewer points than the
/// sharing's threshold, or with points from different sharings, the result is
/// a well-formed field element unrelated to the secret; nothing here can tell
/// the difference.
pub fn reconstruct<P: PointSource>(
    points: &[P],
    config: &SharingConfig,
) -> Result<BigUint> {
    interpolate_at(points, &BigUint::zero(), config)
}

/// Lagrange-interpolate the polynomial through `points` and evaluate it at `x`.
pub fn interpolate_at<P: PointSource>(
    points: &[P],
    x: &BigUint,
    config: &SharingConfig,
) -> Result<BigUint> {
    if points.is_empty() {
        return Err(SharingError::InsufficientShares {
            required: 1,
            provided: 0,
        });
    }
    ensure_distinct_indices(points)?;
    debug!(points = points.len(), "interpolating");

    let field = config.field();
    let x = BigInt::from(x.clone());
    let xs: Vec<BigInt> = points.iter().map(|p| BigInt::from(p.x())).collect();

    let mut result = BigUint::zero();
    for (i, point) in points.iter().enumerate() {
        let (numerator, denominator) = xs
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != i)
            .fold((BigInt::one(), BigInt::one()), |(num, den), (_, xj)| {
                (num * (&x - xj), den * (&xs[i] - xj))
            });
        let weighted = numerator * BigInt::from(point.y().clone());
        let term = field.divide(&weighted, &denominator)?;
        result = field.add(&result, &term);
    }

    Ok(result)
}

fn ensure_distinct_indices<P: PointSource>(points: &[P]) -> Result<()> {
    let mut seen = HashSet::with_capacity(points.len());
    match points.iter().map(PointSource::x).find(|&x| !seen.insert(x)) {
        Some(duplicate) => Err(SharingError::DuplicateIndex(duplicate)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MERSENNE_127;
    use rand::{rngs::StdRng, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0x5EC2E7)
    }

    fn setup_shamir(threshold: u32, total: u32) -> Result<ShamirSSS> {
        ShamirSSS::new(threshold, total, SharingConfig::default())
    }

    mod share_point_tests {
        use super::*;

        #[test]
        fn point_source_exposes_coordinates() {
            let point = SharePoint::new(4, BigUint::from(99u8));
            assert_eq!(point.x(), 4);
            assert_eq!(point.y(), &BigUint::from(99u8));
        }

        #[test]
        fn tuples_are_point_sources() {
            let points = vec![(1u32, BigUint::from(2u8)), (2, BigUint::from(3u8)), (3, BigUint::from(4u8))];
            // y = x + 1, so f(0) = 1
            let result = reconstruct(&points, &SharingConfig::default()).unwrap();
            assert_eq!(result, BigUint::one());
        }
    }

    mod shamir_sss_tests {
        use super::*;

        #[test]
        fn test_invalid_threshold_config() {
            assert!(matches!(
                setup_shamir(0, 5),
                Err(SharingError::InvalidParameters(ParameterError::ZeroThreshold))
            ));
            assert!(matches!(
                setup_shamir(5, 3),
                Err(SharingError::InvalidParameters(
                    ParameterError::ThresholdExceedsTotal {
                        threshold: 5,
                        total: 3
                    }
                ))
            ));
            assert!(matches!(
                setup_shamir(3, 256),
                Err(SharingError::InvalidParameters(ParameterError::TooManyShares(256)))
            ));
        }

        #[test]
        fn test_secret_splitting() {
            let shamir = setup_shamir(3, 5).unwrap();
            let points = shamir
                .split_secret(&BigUint::from(42u8), &mut rng())
                .unwrap();

            assert_eq!(points.len(), 5);
            for (i, point) in points.iter().enumerate() {
                assert_eq!(point.index, i as u32 + 1);
                assert!(shamir.config().field().contains(&point.value));
            }
        }

        #[test]
        fn secret_outside_field_is_rejected() {
            let shamir = setup_shamir(2, 3).unwrap();
            let secret = BigUint::from(MERSENNE_127);
            assert_eq!(
                shamir.split_secret(&secret, &mut rng()),
                Err(SharingError::InvalidParameters(ParameterError::SecretOutOfRange))
            );
        }

        #[test]
        fn test_secret_reconstruction() {
            let shamir = setup_shamir(3, 5).unwrap();
            let secret = BigUint::from(123_456_789u64);
            let points = shamir.split_secret(&secret, &mut rng()).unwrap();
            assert_eq!(shamir.reconstruct_secret(&points).unwrap(), secret);
        }

        #[test]
        fn test_insufficient_shares() {
            let shamir = setup_shamir(3, 5).unwrap();
            let points = shamir
                .split_secret(&BigUint::from(100u8), &mut rng())
                .unwrap();
            assert_eq!(
                shamir.reconstruct_secret(&points[..2]),
                Err(SharingError::InsufficientShares {
                    required: 3,
                    provided: 2
                })
            );
            let empty: &[SharePoint] = &[];
            assert!(matches!(
                shamir.reconstruct_secret(empty),
                Err(SharingError::InsufficientShares { provided: 0, .. })
            ));
        }

        #[test]
        fn test_threshold_of_one_copies_secret() {
            let shamir = setup_shamir(1, 4).unwrap();
            let secret = BigUint::from(77u8);
            let points = shamir.split_secret(&secret, &mut rng()).unwrap();
            assert!(points.iter().all(|p| p.value == secret));
        }

        #[test]
        fn test_zero_secret() {
            let shamir = setup_shamir(2, 3).unwrap();
            let points = shamir.split_secret(&BigUint::zero(), &mut rng()).unwrap();
            assert!(shamir.reconstruct_secret(&points).unwrap().is_zero());
        }

        #[test]
        fn test_secret_near_modulus() {
            let shamir = setup_shamir(4, 6).unwrap();
            let secret = BigUint::from(MERSENNE_127 - 1);
            let points = shamir.split_secret(&secret, &mut rng()).unwrap();
            assert_eq!(shamir.reconstruct_secret(&points[2..]).unwrap(), secret);
        }

        #[test]
        fn test_create_shamir_polynomial() {
            let shamir = setup_shamir(5, 7).unwrap();
            let secret = BigUint::from(123u8);
            let mut rng = rng();
            let poly1 = shamir.create_shamir_polynomial_with(&mut rng, &secret);
            let poly2 = shamir.create_shamir_polynomial_with(&mut rng, &secret);

            assert_eq!(poly1.coefficients().len(), 5);
            assert_eq!(poly1.constant_term(), secret);
            assert_eq!(poly2.constant_term(), secret);
            assert_ne!(
                poly1.coefficients()[1..],
                poly2.coefficients()[1..],
                "random coefficients should differ between polynomials"
            );
        }

        #[test]
        fn test_same_seed_same_shares() {
            let shamir = setup_shamir(3, 5).unwrap();
            let secret = BigUint::from(9u8);
            let a = shamir.split_secret(&secret, &mut rng()).unwrap();
            let b = shamir.split_secret(&secret, &mut rng()).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn test_split_encoded_embeds_header() {
            let shamir = setup_shamir(2, 3).unwrap();
            let tokens = shamir
                .split_encoded(&BigUint::from(5u8), &mut rng())
                .unwrap();
            assert_eq!(tokens.len(), 3);
            for (i, token) in tokens.iter().enumerate() {
                let decoded = token.decode().unwrap();
                assert_eq!(decoded.total, 3);
                assert_eq!(decoded.threshold, 2);
                assert_eq!(decoded.index, i as u32 + 1);
            }
        }
    }

    mod interpolation_tests {
        use super::*;

        #[test]
        fn duplicate_indices_are_rejected() {
            let points = vec![
                SharePoint::new(1, BigUint::from(5u8)),
                SharePoint::new(2, BigUint::from(6u8)),
                SharePoint::new(1, BigUint::from(7u8)),
            ];
            assert_eq!(
                reconstruct(&points, &SharingConfig::default()),
                Err(SharingError::DuplicateIndex(1))
            );
        }

        #[test]
        fn empty_input_is_rejected() {
            let points: Vec<SharePoint> = Vec::new();
            assert!(matches!(
                reconstruct(&points, &SharingConfig::default()),
                Err(SharingError::InsufficientShares { required: 1, provided: 0 })
            ));
        }

        #[test]
        fn interpolate_at_recovers_every_point() {
            let config = SharingConfig::default();
            let points = split(&BigUint::from(31u8), 3, 5, &config, &mut rng())
                .unwrap();
            for target in &points {
                let value = interpolate_at(
                    &points[..3],
                    &BigUint::from(target.index),
                    &config,
                )
                .unwrap();
                assert_eq!(value, target.value);
            }
        }

        #[test]
        fn small_prime_field() {
            let config = SharingConfig::new(BigUint::from(257u32)).unwrap();
            let secret = BigUint::from(200u8);
            let points = split(&secret, 3, 5, &config, &mut rng()).unwrap();
            assert_eq!(reconstruct(&points[1..4], &config).unwrap(), secret);
        }

        #[test]
        fn split_secure_round_trips() {
            let config = SharingConfig::default();
            let secret = BigUint::from(0xDEAD_BEEFu32);
            let points = split_secure(&secret, 2, 4, &config).unwrap();
            assert_eq!(reconstruct(&points[2..], &config).unwrap(), secret);
        }
    }
}
