#[cfg(test)]
mod tests {
    use math::{BigUint, PrimeField};
    use pss_core::{
        secret::{secret_from_bytes, secret_to_bytes},
        DecodedShare, EncodedShare, Result, ShamirSSS, ShareSet, SharePoint,
        SharingConfig, SharingError,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn rng() -> ChaCha20Rng {
        ChaCha20Rng::from_seed([0x42; 32])
    }

    #[test]
    fn test_complete_workflow() -> Result<()> {
        let config = SharingConfig::default();
        let message = "Test secret";

        // 1. Split
        let shamir = ShamirSSS::new(3, 5, config.clone())?;
        let secret = secret_from_bytes(message.as_bytes(), &config)?;
        let tokens: Vec<String> = shamir
            .split_encoded(&secret, &mut rng())?
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(tokens.len(), 5);

        // 2. Collect parts in arbitrary order
        let mut set = ShareSet::new();
        for text in [&tokens[2], &tokens[4], &tokens[1]] {
            let token: EncodedShare = text.parse()?;
            set.insert(token.decode()?)?;
        }
        assert!(set.is_complete());

        // 3. Recover
        let recovered = set.recover(&config)?;
        assert_eq!(secret_to_bytes(&recovered), message.as_bytes());

        Ok(())
    }

    #[test]
    fn shares_from_two_sharings_do_not_mix() -> Result<()> {
        let config = SharingConfig::default();
        let first = ShamirSSS::new(2, 3, config.clone())?
            .split_encoded(&BigUint::from(1u8), &mut rng())?;
        let second = ShamirSSS::new(2, 4, config)?
            .split_encoded(&BigUint::from(2u8), &mut rng())?;

        let mut set = ShareSet::new();
        set.insert(first[0].decode()?)?;
        let err = set.insert(second[1].decode()?).unwrap_err();
        assert!(matches!(err, SharingError::MismatchedSharingSet { .. }));
        Ok(())
    }

    #[test]
    fn custom_prime_is_honoured() -> Result<()> {
        // 2^61 - 1
        let prime = BigUint::from((1u64 << 61) - 1);
        let config = SharingConfig::new(prime.clone())?;
        let field = PrimeField::new(prime).expect("valid modulus");

        let shamir = ShamirSSS::new(4, 7, config.clone())?;
        let secret = BigUint::from(123_456_789_012u64);
        let points = shamir.split_secret(&secret, &mut rng())?;
        assert!(points.iter().all(|p| field.contains(&p.value)));
        assert_eq!(shamir.reconstruct_secret(&points[3..])?, secret);

        // The same points interpolated in a different field give garbage.
        let wrong = pss_core::reconstruct(&points[..4], &SharingConfig::default())?;
        assert_ne!(wrong, secret);
        Ok(())
    }

    #[test]
    fn shares_serialize_as_json() {
        let token = pss_core::encode_share(5, 3, 2, &BigUint::from(0x2Au8))
            .expect("encodes");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"F053222A\"");
        let back: EncodedShare = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);

        let decoded: DecodedShare = token.decode().unwrap();
        let json = serde_json::to_string(&decoded).unwrap();
        let back: DecodedShare = serde_json::from_str(&json).unwrap();
        assert_eq!(back, decoded);

        let point = SharePoint::new(1, BigUint::from(7u8));
        let json = serde_json::to_string(&point).unwrap();
        let back: SharePoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }

    #[test]
    fn malformed_json_token_is_rejected() {
        let err = serde_json::from_str::<EncodedShare>("\"F0\"")
            .map(|t| t.decode());
        assert!(matches!(err, Ok(Err(SharingError::MalformedShare(_)))));
        assert!(serde_json::from_str::<EncodedShare>("\"xyz\"").is_err());
    }
}
