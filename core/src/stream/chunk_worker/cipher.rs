//! Per-chunk AES-256-CBC operations.
//!
//! encrypt: random IV → PKCS#7 pad → CBC → `iv || ciphertext`
//! decrypt: split IV → CBC → unpad

use rand::{rngs::OsRng, RngCore};

use crate::constants::{BLOCK_SIZE, IV_LEN};
use crate::crypto::{cbc_decrypt, cbc_encrypt, pad_pkcs7, unpad_pkcs7, CryptoError, DerivedKey};
use crate::stream::framing::{decode_frame, encode_frame, ChunkFrame};
use super::types::{ChunkProcessor, Operation};

/// Encrypt one chunk under a fresh random IV and return the encoded frame.
pub fn encrypt_chunk(key: &DerivedKey, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut iv = [0u8; IV_LEN];
    OsRng.fill_bytes(&mut iv);
    encrypt_chunk_with_iv(key, &iv, plaintext)
}

/// Deterministic variant of `encrypt_chunk` for a caller-supplied IV.
pub fn encrypt_chunk_with_iv(
    key: &DerivedKey,
    iv: &[u8; IV_LEN],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let padded = pad_pkcs7(plaintext, BLOCK_SIZE);
    let ciphertext = cbc_encrypt(key, iv, &padded)?;
    Ok(encode_frame(iv, &ciphertext))
}

/// Decrypt an encoded frame back to plaintext.
///
/// Errors:
/// - `Frame` when the frame is shorter than an IV
/// - `CiphertextNotAligned` / `EmptyCiphertext` for a damaged body
/// - `Padding` when the trailing pad does not validate (usually a wrong key)
pub fn decrypt_chunk(key: &DerivedKey, frame: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let ChunkFrame { iv, ciphertext } = decode_frame(frame)?;
    let mut plain = cbc_decrypt(key, iv, ciphertext)?;
    let len = unpad_pkcs7(&plain, BLOCK_SIZE)?.len();
    plain.truncate(len);
    Ok(plain)
}

/// Production processor: owns the derived key, read-only for its lifetime.
#[derive(Debug)]
pub struct CbcChunkProcessor {
    key: DerivedKey,
    operation: Operation,
}

impl CbcChunkProcessor {
    pub fn new(key: DerivedKey, operation: Operation) -> Self {
        Self { key, operation }
    }
}

impl ChunkProcessor for CbcChunkProcessor {
    fn operation(&self) -> Operation {
        self.operation
    }

    fn process(&self, _chunk_id: u32, input: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match self.operation {
            Operation::Encrypt => encrypt_chunk(&self.key, input),
            Operation::Decrypt => decrypt_chunk(&self.key, input),
        }
    }
}
