//! Leading-zero proof-of-work search.
//!
//! Each attempt hashes `identifier + decimal(nonce)` with SHA-256 and
//! compares the hex digest against the required `'0'` prefix. The search is
//! a plain linear scan from nonce 0, so the first match is also the
//! smallest. Digests are recomputed fresh per attempt; no hash state is
//! carried between attempts.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowError {
    #[error("identifier must not be empty")]
    EmptyIdentifier,

    #[error("prefix must not be empty")]
    EmptyPrefix,

    #[error("prefix must contain only '0' characters, found {0:?}")]
    InvalidPrefixChar(char),

    #[error("nonce space exhausted without a matching digest")]
    Exhausted,
}

/// A winning search result.
///
/// `message` is the `identifier + decimal(nonce)` string that produced
/// `digest`, and `nonce` is the smallest value satisfying the prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Smallest nonce whose digest satisfies the prefix
    pub nonce: u64,
    /// Lowercase hex SHA-256 digest of `message`
    pub digest: String,
    /// The hashed `identifier + nonce` string
    pub message: String,
}

/// Hex SHA-256 digest of `identifier + decimal(nonce)`.
pub fn digest_hex(identifier: &str, nonce: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(nonce.to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Lazy sequence of `(nonce, digest)` attempts for an identifier.
///
/// Starts at nonce 0 and steps by exactly 1. Callers can `take_while` on it
/// to drive a search themselves; [`find_nonce`] is the shorthand for the
/// usual prefix condition.
#[derive(Debug, Clone)]
pub struct Attempts<'a> {
    identifier: &'a str,
    next_nonce: Option<u64>,
}

impl<'a> Attempts<'a> {
    pub fn new(identifier: &'a str) -> Self {
        Self {
            identifier,
            next_nonce: Some(0),
        }
    }
}

impl Iterator for Attempts<'_> {
    type Item = (u64, String);

    fn next(&mut self) -> Option<Self::Item> {
        let nonce = self.next_nonce?;
        self.next_nonce = nonce.checked_add(1);
        Some((nonce, digest_hex(self.identifier, nonce)))
    }
}

fn check_inputs(identifier: &str, prefix: &str) -> Result<(), PowError> {
    if identifier.is_empty() {
        return Err(PowError::EmptyIdentifier);
    }
    if prefix.is_empty() {
        return Err(PowError::EmptyPrefix);
    }
    if let Some(bad) = prefix.chars().find(|c| *c != '0') {
        return Err(PowError::InvalidPrefixChar(bad));
    }
    Ok(())
}

/// Find the smallest nonce whose digest starts with `prefix`.
///
/// `prefix` must be a non-empty run of `'0'` characters; anything else is
/// rejected before hashing. The search has no timeout: a long prefix can
/// keep the calling thread busy indefinitely.
pub fn find_nonce(identifier: &str, prefix: &str) -> Result<Solution, PowError> {
    check_inputs(identifier, prefix)?;

    for (nonce, digest) in Attempts::new(identifier) {
        if digest.starts_with(prefix) {
            return Ok(Solution {
                message: format!("{}{}", identifier, nonce),
                digest,
                nonce,
            });
        }
    }

    Err(PowError::Exhausted)
}

/// Multi-threaded variant of [`find_nonce`] with the same result.
///
/// Each worker scans the stripe `nonce ≡ worker (mod threads)` upward and
/// publishes matches into a shared minimum. A worker stops once its next
/// candidate is at or past the current minimum, so the value left at the
/// end is the smallest match overall, identical to the sequential scan.
pub fn find_nonce_parallel(
    identifier: &str,
    prefix: &str,
    threads: usize,
) -> Result<Solution, PowError> {
    check_inputs(identifier, prefix)?;

    if threads <= 1 {
        return find_nonce(identifier, prefix);
    }

    // Lowest matching nonce published so far; u64::MAX while none.
    let best = AtomicU64::new(u64::MAX);
    let stride = threads as u64;

    std::thread::scope(|scope| {
        for worker in 0..stride {
            let best = &best;
            scope.spawn(move || {
                let mut nonce = worker;
                while nonce < best.load(Ordering::Acquire) {
                    if digest_hex(identifier, nonce).starts_with(prefix) {
                        best.fetch_min(nonce, Ordering::AcqRel);
                        return;
                    }
                    nonce = match nonce.checked_add(stride) {
                        Some(next) => next,
                        None => return,
                    };
                }
            });
        }
    });

    match best.load(Ordering::Acquire) {
        u64::MAX => Err(PowError::Exhausted),
        nonce => Ok(Solution {
            message: format!("{}{}", identifier, nonce),
            digest: digest_hex(identifier, nonce),
            nonce,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_plain_concatenation() {
        let direct = hex::encode(Sha256::digest("ymjrcc42".as_bytes()));
        assert_eq!(digest_hex("ymjrcc", 42), direct);
        assert_eq!(digest_hex("ymjrcc", 42).len(), 64);
    }

    #[test]
    fn attempts_start_at_zero_and_step_by_one() {
        let pairs: Vec<(u64, String)> = Attempts::new("abc").take(3).collect();

        assert_eq!(pairs[0].0, 0);
        assert_eq!(pairs[1].0, 1);
        assert_eq!(pairs[2].0, 2);

        for (nonce, digest) in &pairs {
            assert_eq!(*digest, digest_hex("abc", *nonce));
        }
        assert_ne!(pairs[0].1, pairs[1].1);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            find_nonce("", "0000"),
            Err(PowError::EmptyIdentifier)
        ));
        assert!(matches!(find_nonce("ymjrcc", ""), Err(PowError::EmptyPrefix)));
        assert!(matches!(
            find_nonce("ymjrcc", "00a0"),
            Err(PowError::InvalidPrefixChar('a'))
        ));
        assert!(matches!(
            find_nonce_parallel("ymjrcc", "0x", 4),
            Err(PowError::InvalidPrefixChar('x'))
        ));
    }

    #[test]
    fn finds_smallest_nonce_for_short_prefix() {
        let solution = find_nonce("ymjrcc", "000").unwrap();

        assert!(solution.digest.starts_with("000"));
        assert_eq!(solution.message, format!("ymjrcc{}", solution.nonce));
        assert_eq!(solution.digest, digest_hex("ymjrcc", solution.nonce));

        for nonce in 0..solution.nonce {
            assert!(
                !digest_hex("ymjrcc", nonce).starts_with("000"),
                "nonce {} already satisfies the prefix",
                nonce
            );
        }
    }

    #[test]
    fn search_is_deterministic() {
        let first = find_nonce("ymjrcc", "000").unwrap();
        let second = find_nonce("ymjrcc", "000").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parallel_search_matches_sequential() {
        let sequential = find_nonce("ymjrcc", "000").unwrap();

        for threads in [2, 4, 7] {
            let parallel = find_nonce_parallel("ymjrcc", "000", threads).unwrap();
            assert_eq!(parallel, sequential, "threads = {}", threads);
        }
    }
}
