//! Authorization state and PKCE (Proof Key for Code Exchange) data

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Challenge method sent with every PKCE authorize request
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Per-authorization random data
///
/// `state` protects the callback against forgery; `code_verifier` is kept
/// server-side and `code_challenge` travels in the authorize URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthData {
    pub state: String,
    pub code_verifier: String,
    pub code_challenge: String,
}

impl AuthData {
    /// Generates fresh state and PKCE codes using the S256 method
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();

        let state_bytes: [u8; 32] = rng.gen();
        let verifier_bytes: [u8; 32] = rng.gen();
        let code_verifier = URL_SAFE_NO_PAD.encode(verifier_bytes);

        Self {
            state: URL_SAFE_NO_PAD.encode(state_bytes),
            code_challenge: code_challenge(&code_verifier),
            code_verifier,
        }
    }
}

/// Computes `base64url(sha256(verifier))` without padding
pub fn code_challenge(code_verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(code_verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
