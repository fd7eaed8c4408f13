use math::{BigUint, PrimeField};
use rand::{CryptoRng, Rng};

/// Draw a field element uniformly from `[0, p)`.
///
/// Samples `bits(p)` random bits and rejects values `>= p`, so the expected
/// number of draws is below two for any modulus.
pub fn random_field_element<R>(rng: &mut R, field: &PrimeField) -> BigUint
where
    R: Rng + CryptoRng + ?Sized,
{
    let modulus = field.modulus();
    let bits = modulus.bits();
    let len = bits.div_ceil(8) as usize;
    let excess = (len as u64) * 8 - bits;
    let mut bytes = vec![0u8; len];

    loop {
        rng.fill_bytes(&mut bytes);
        if let Some(top) = bytes.last_mut() {
            *top &= 0xFF >> excess;
        }
        let candidate = BigUint::from_bytes_le(&bytes);
        if field.contains(&candidate) {
            return candidate;
        }
    }
}
