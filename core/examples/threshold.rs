use pss_core::{
    secret::{secret_from_bytes, secret_to_bytes},
    EncodedShare, ShamirSSS, ShareSet, SharingConfig,
};

const SECRET: &[u8] = b"hunter2";

/// Split a short secret into 3-of-5 tokens, then recover it from three of
/// them given in a shuffled order.
fn main() {
    let config = SharingConfig::default();
    let shamir = ShamirSSS::new(3, 5, config.clone())
        .expect("3-of-5 is a valid configuration");

    let secret =
        secret_from_bytes(SECRET, &config).expect("secret fits in the field");
    let tokens = shamir
        .split_encoded(&secret, &mut rand::rng())
        .expect("split should succeed");

    println!("Partial secrets:");
    for token in &tokens {
        println!("  {token}");
    }

    let mut set = ShareSet::new();
    for text in [&tokens[4], &tokens[0], &tokens[2]].map(ToString::to_string) {
        let token: EncodedShare = text.parse().expect("token parses");
        set.insert(token.decode().expect("token decodes"))
            .expect("token belongs to the set");
    }

    let recovered = set.recover(&config).expect("enough shares");
    assert_eq!(secret_to_bytes(&recovered), SECRET);
    println!("Recovered: {}", String::from_utf8_lossy(&secret_to_bytes(&recovered)));
}
