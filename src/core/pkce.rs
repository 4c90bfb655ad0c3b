//! PKCE (Proof Key for Code Exchange, RFC 7636).
//!
//! The verifier stays in local storage until the callback; the S256
//! challenge goes into the authorize URL.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};

/// Alphabet the verifier is drawn from.
const VERIFIER_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Verifier length in characters.
pub const VERIFIER_LEN: usize = 64;

/// A verifier and its derived challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PkcePair {
    pub verifier: String,
    pub challenge: String,
}

impl PkcePair {
    /// Generate a fresh verifier and its S256 challenge.
    #[must_use]
    pub fn generate() -> Self {
        let verifier = generate_verifier();
        let challenge = compute_challenge(&verifier);
        Self {
            verifier,
            challenge,
        }
    }
}

/// Generate a random alphanumeric code verifier.
///
/// Each of the 64 random bytes selects a character by `byte % 62`.
#[must_use]
pub fn generate_verifier() -> String {
    let mut bytes = [0u8; VERIFIER_LEN];
    OsRng.fill_bytes(&mut bytes);
    bytes
        .iter()
        .map(|b| char::from(VERIFIER_ALPHABET[usize::from(*b) % VERIFIER_ALPHABET.len()]))
        .collect()
}

/// Compute the S256 code challenge: `BASE64URL(SHA256(verifier))`, unpadded.
#[must_use]
pub fn compute_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}
