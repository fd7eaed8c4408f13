//! Packing raw secret bytes into a field element and back.
//!
//! Bytes are read little-endian, base 256. Trailing zero bytes therefore do
//! not survive a round trip: `b"ab\0"` and `b"ab"` pack to the same integer.

use math::BigUint;
use num_traits::Zero;

use crate::{
    error::{ParameterError, Result},
    params::SharingConfig,
};

/// Longest byte string guaranteed to fit below the prime.
pub fn max_secret_len(config: &SharingConfig) -> usize {
    ((config.prime().bits() - 1) / 8) as usize
}

/// Pack `bytes` into an integer, rejecting values outside the field.
pub fn secret_from_bytes(bytes: &[u8], config: &SharingConfig) -> Result<BigUint> {
    let secret = BigUint::from_bytes_le(bytes);
    if !config.field().contains(&secret) {
        return Err(ParameterError::SecretOutOfRange.into());
    }
    Ok(secret)
}

/// Unpack an integer produced by [`secret_from_bytes`].
pub fn secret_to_bytes(secret: &BigUint) -> Vec<u8> {
    if secret.is_zero() {
        return Vec::new();
    }
    secret.to_bytes_le()
}
