// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! Password-based key derivation.
//!
//! Design:
//! - PBKDF2-HMAC-SHA-256, 32-byte output.
//! - 100,000 rounds by default; the count is not stored in the file.
//! - Salt is 16 random bytes generated once per encryption run and written
//!   at the head of the file.

use hmac::Hmac;
use rand::{rngs::OsRng, RngCore};
use sha2::Sha256;

use crate::constants::{KEY_LEN_32, SALT_LEN};
use crate::crypto::types::{CryptoError, DerivedKey};

/// Derive a 32-byte key from `password` and `salt`.
///
/// Deterministic given identical inputs; no side effects.
///
/// Errors:
/// - `CryptoError::Derivation` when `iterations` is zero or the PRF rejects
///   the password as a key (never happens for HMAC, kept fatal).
pub fn derive_key(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    iterations: u32,
) -> Result<DerivedKey, CryptoError> {
    if iterations == 0 {
        return Err(CryptoError::Derivation("iteration count must be non-zero".into()));
    }

    let mut key = [0u8; KEY_LEN_32];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(password, salt, iterations, &mut key)
        .map_err(|e| CryptoError::Derivation(e.to_string()))?;
    Ok(DerivedKey::new(key))
}

/// Fresh random salt from the OS CSPRNG.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    salt
}
