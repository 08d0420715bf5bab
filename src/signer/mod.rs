//! RSA message signing and verification.
//!
//! Signs the SHA-256 digest of a UTF-8 message with a freshly generated
//! 2048-bit keypair using RSASSA-PKCS1-v1.5. Keys live only as long as the
//! [`Keypair`] value; nothing is persisted.

use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// RSA modulus size in bits.
pub const RSA_KEY_BITS: usize = 2048;

#[derive(Error, Debug)]
pub enum SignerError {
    #[error("key generation failed: {0}")]
    KeyGeneration(rsa::Error),

    #[error("signing failed: {0}")]
    Signing(rsa::Error),
}

/// An in-memory RSA keypair.
///
/// The private key never leaves the struct; callers get the public key and
/// signatures out.
pub struct Keypair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl Keypair {
    /// Generate a fresh 2048-bit keypair from the OS CSPRNG.
    ///
    /// Failure means the environment could not supply entropy or primes; it
    /// is surfaced immediately, never retried.
    pub fn generate() -> Result<Self, SignerError> {
        let mut rng = rand::thread_rng();
        let private_key =
            RsaPrivateKey::new(&mut rng, RSA_KEY_BITS).map_err(SignerError::KeyGeneration)?;
        let public_key = RsaPublicKey::from(&private_key);

        Ok(Self {
            private_key,
            public_key,
        })
    }

    /// The verifying half of the pair.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// Sign the SHA-256 digest of `message`.
    pub fn sign(&self, message: &str) -> Result<Vec<u8>, SignerError> {
        let digest = Sha256::digest(message.as_bytes());
        self.private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .map_err(SignerError::Signing)
    }
}

/// Sign `message` with a fresh keypair.
///
/// Returns the public key and the signature; the private key is dropped on
/// return.
pub fn sign_message(message: &str) -> Result<(RsaPublicKey, Vec<u8>), SignerError> {
    let keypair = Keypair::generate()?;
    let signature = keypair.sign(message)?;
    Ok((keypair.public_key, signature))
}

/// Check `signature` over `message` against `public_key`.
///
/// Any mismatch (altered message, wrong key, corrupted signature bytes)
/// yields `false`; verification itself never errors.
pub fn verify(message: &str, public_key: &RsaPublicKey, signature: &[u8]) -> bool {
    let digest = Sha256::digest(message.as_bytes());
    public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}
