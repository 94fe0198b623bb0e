//! src/headers/encode.rs
//!
//! Header encoding.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::SALT_LEN;
use crate::headers::types::FileHeader;

/// Serialize a `FileHeader` into its fixed 20-byte form.
#[inline]
pub fn encode_header(h: &FileHeader) -> [u8; FileHeader::LEN] {
    let mut out = [0u8; FileHeader::LEN];
    out[..SALT_LEN].copy_from_slice(&h.salt);                 // 0..16  salt
    BigEndian::write_u32(&mut out[SALT_LEN..], h.chunk_count); // 16..20 chunk count
    out
}
