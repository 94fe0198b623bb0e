//! crypto/cbc.rs
//! AES-256-CBC over whole blocks.
//!
//! Padding is applied by the caller (`padding.rs`) so that padding failures
//! surface with their precise cause instead of an opaque unpad error.

use aes::Aes256;
use cbc::cipher::{block_padding::NoPadding, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::constants::{BLOCK_SIZE, IV_LEN, KEY_LEN_32};
use crate::crypto::types::{CryptoError, DerivedKey};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

fn check_aligned(data: &[u8]) -> Result<(), CryptoError> {
    if data.is_empty() {
        return Err(CryptoError::EmptyCiphertext);
    }
    if data.len() % BLOCK_SIZE != 0 {
        return Err(CryptoError::CiphertextNotAligned { len: data.len() });
    }
    Ok(())
}

fn invalid_length(key: &DerivedKey, iv: &[u8]) -> CryptoError {
    if iv.len() != IV_LEN {
        CryptoError::InvalidIvLen { expected: IV_LEN, actual: iv.len() }
    } else {
        CryptoError::InvalidKeyLen { expected: KEY_LEN_32, actual: key.as_bytes().len() }
    }
}

/// Encrypt block-aligned `padded` under `key` and `iv`.
pub fn cbc_encrypt(key: &DerivedKey, iv: &[u8], padded: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_aligned(padded)?;
    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| invalid_length(key, iv))?;
    Ok(cipher.encrypt_padded_vec_mut::<NoPadding>(padded))
}

/// Decrypt block-aligned `ciphertext`; the result still carries its padding.
pub fn cbc_decrypt(key: &DerivedKey, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    check_aligned(ciphertext)?;
    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|_| invalid_length(key, iv))?;
    cipher
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| CryptoError::CiphertextNotAligned { len: ciphertext.len() })
}
