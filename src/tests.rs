//! End-to-end pipeline tests: search, sign, verify.

use crate::{digest_hex, find_nonce, sign_message, verify};

const IDENTIFIER: &str = "ymjrcc";

#[test]
fn four_zero_search_finds_the_smallest_nonce() {
    let solution = find_nonce(IDENTIFIER, "0000").unwrap();

    assert!(solution.digest.starts_with("0000"));
    assert_eq!(solution.message, format!("{}{}", IDENTIFIER, solution.nonce));
    assert_eq!(solution.digest, digest_hex(IDENTIFIER, solution.nonce));

    for nonce in 0..solution.nonce {
        assert!(
            !digest_hex(IDENTIFIER, nonce).starts_with("0000"),
            "nonce {} already satisfies the prefix",
            nonce
        );
    }
}

#[test]
fn five_zero_search_starts_fresh_and_lands_at_or_beyond_four_zeros() {
    let four = find_nonce(IDENTIFIER, "0000").unwrap();
    let five = find_nonce(IDENTIFIER, "00000").unwrap();

    // Every five-zero digest is also a four-zero digest, so the fresh
    // search cannot finish earlier than the four-zero one.
    assert!(five.digest.starts_with("00000"));
    assert!(five.nonce >= four.nonce);
}

#[test]
fn winning_message_signs_and_verifies() {
    let solution = find_nonce(IDENTIFIER, "0000").unwrap();
    let (public_key, signature) = sign_message(&solution.message).unwrap();

    assert!(verify(&solution.message, &public_key, &signature));
    // The digest is not the signed message
    assert!(!verify(&solution.digest, &public_key, &signature));
}
