//! crypto/padding.rs
//! PKCS#7 padding.
//!
//! The pad length `p` is always in `1..=block`, so unpadded input that is
//! already block-aligned still gains a full block.
//!
//! Unpadding is the only integrity check in the format: there is no MAC, so a
//! wrong key usually trips it but is not guaranteed to.

use crate::crypto::types::PaddingError;

/// Append `p = block - (len % block)` bytes of value `p`.
pub fn pad_pkcs7(data: &[u8], block: usize) -> Vec<u8> {
    debug_assert!(block > 0 && block <= u8::MAX as usize);
    let pad = block - (data.len() % block);
    let mut out = Vec::with_capacity(data.len() + pad);
    out.extend_from_slice(data);
    out.resize(data.len() + pad, pad as u8);
    out
}

/// Strip PKCS#7 padding, returning the unpadded prefix.
pub fn unpad_pkcs7(data: &[u8], block: usize) -> Result<&[u8], PaddingError> {
    let last = *data.last().ok_or(PaddingError::Empty)?;
    let pad = last as usize;

    if pad == 0 {
        return Err(PaddingError::ZeroPad);
    }
    if pad > block {
        return Err(PaddingError::ExceedsBlock { pad, block });
    }
    if pad > data.len() {
        return Err(PaddingError::ExceedsBuffer { pad, len: data.len() });
    }

    let (body, tail) = data.split_at(data.len() - pad);
    if tail.iter().any(|&b| b != last) {
        return Err(PaddingError::Inconsistent { pad });
    }
    Ok(body)
}
