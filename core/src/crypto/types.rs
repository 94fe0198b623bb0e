// ## 📂 File: `src/crypto/types.rs`

use std::fmt;
use thiserror::Error;

use crate::constants::KEY_LEN_32;
use crate::stream::framing::FrameError;

/// 256-bit symmetric key produced by `derive_key`.
///
/// Immutable once created: there is no API to modify the bytes, so a single
/// instance can be borrowed by every worker without synchronization.
#[derive(Clone, PartialEq, Eq)]
pub struct DerivedKey([u8; KEY_LEN_32]);

impl DerivedKey {
    pub(crate) fn new(bytes: [u8; KEY_LEN_32]) -> Self {
        Self(bytes)
    }

    /// Build a key from raw bytes (tests, externally managed keys).
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN_32] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN_32] {
        &self.0
    }
}

// Key material never reaches logs.
impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey(<redacted>)")
    }
}

/// PKCS#7 removal failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaddingError {
    #[error("empty buffer")]
    Empty,

    #[error("pad length is zero")]
    ZeroPad,

    #[error("pad length {pad} exceeds block size {block}")]
    ExceedsBlock { pad: usize, block: usize },

    #[error("pad length {pad} exceeds buffer length {len}")]
    ExceedsBuffer { pad: usize, len: usize },

    #[error("pad bytes are not all equal to {pad}")]
    Inconsistent { pad: usize },
}

#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// IV length mismatch (must be one block).
    #[error("invalid IV length: expected={expected}, actual={actual}")]
    InvalidIvLen { expected: usize, actual: usize },

    /// CBC input is not a whole number of blocks.
    #[error("ciphertext length {len} is not a multiple of the block size")]
    CiphertextNotAligned { len: usize },

    #[error("ciphertext is empty")]
    EmptyCiphertext,

    #[error("padding error: {0}")]
    Padding(#[from] PaddingError),

    #[error("frame error: {0}")]
    Frame(#[from] FrameError),

    /// PBKDF2 internal failure.
    #[error("key derivation failed: {0}")]
    Derivation(String),
}
