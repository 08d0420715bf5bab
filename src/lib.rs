//! SHA-256 leading-zero proof-of-work with RSA message signing.
//!
//! # Overview
//!
//! The search appends a decimal nonce to a fixed identifier and hashes the
//! result with SHA-256 until the hex digest starts with a required run of
//! `'0'` characters. The winning `identifier + nonce` string is then signed
//! with a fresh 2048-bit RSA keypair and the signature is verified against
//! the public key.
//!
//! # Example
//!
//! ```rust
//! use powsign::{find_nonce, sign_message, verify};
//!
//! // Find the smallest nonce whose digest starts with "00"
//! let solution = find_nonce("ymjrcc", "00")?;
//! assert!(solution.digest.starts_with("00"));
//!
//! // Sign the winning message and check the signature
//! let (public_key, signature) = sign_message(&solution.message)?;
//! assert!(verify(&solution.message, &public_key, &signature));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod pow;
pub mod signer;

// Convenience re-exports
pub use pow::{digest_hex, find_nonce, find_nonce_parallel, Attempts, PowError, Solution};
pub use signer::{sign_message, verify, Keypair, SignerError};

#[cfg(test)]
mod tests;
