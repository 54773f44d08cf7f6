/// Session token utilities
///
/// This module generates bearer tokens for the session cookie and derives the
/// session id stored in the database.
///
/// # Security
///
/// - **Token**: 20 cryptographically random bytes, base-32 lowercase without
///   padding (32 chars)
/// - **Session id**: SHA-256 of the token, lowercase hex (64 chars); the
///   token itself is never persisted server-side
/// - **PIN check**: constant-time comparison to prevent timing attacks
///
/// # Example
///
/// ```
/// use weekspend_shared::auth::token::{generate_session_token, session_id_from_token};
///
/// let token = generate_session_token();
/// assert_eq!(token.len(), 32);
///
/// let id = session_id_from_token(&token);
/// assert_eq!(id.len(), 64);
///
/// // Derivation is deterministic
/// assert_eq!(id, session_id_from_token(&token));
/// ```

use data_encoding::BASE32_NOPAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes backing a session token
const TOKEN_BYTES: usize = 20;

/// Length of an encoded session token (base-32 of 20 bytes, no padding)
pub const TOKEN_LENGTH: usize = 32;

/// Generates a new session bearer token
///
/// Creates 20 bytes of cryptographic randomness and encodes them as
/// lowercase, unpadded base-32. The resulting string is what the client
/// holds in the `session` cookie.
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    BASE32_NOPAD.encode(&bytes).to_lowercase()
}

/// Derives the session id from a bearer token
///
/// Computes the SHA-256 digest of the token's UTF-8 bytes, rendered as
/// lowercase hex (64 chars). The id is the database primary key; storing
/// only the digest means a compromised store does not leak usable tokens.
pub fn session_id_from_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Verifies a sign-in PIN against the configured secret
///
/// Uses constant-time comparison so the check duration does not leak which
/// characters match.
pub fn verify_pin(candidate: &str, expected: &str) -> bool {
    constant_time_compare(candidate, expected)
}

/// Constant-time string comparison
///
/// Always compares the full length of both strings, accumulating differences
/// with bitwise OR instead of short-circuiting.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut result = 0u8;
    for i in 0..a_bytes.len() {
        result |= a_bytes[i] ^ b_bytes[i];
    }

    result == 0
}
