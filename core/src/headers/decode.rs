//! src/headers/decode.rs
//!
//! Header decoding.
//!
//! Design notes:
//! - Reads the fixed 20-byte prefix; the caller hands the remainder to
//!   `framing::read_frames`.
//! - A zero chunk count is accepted here and rejected by the orchestrator,
//!   which never writes such a file.

use byteorder::{BigEndian, ByteOrder};

use crate::constants::SALT_LEN;
use crate::headers::types::FileHeader;
use crate::stream::framing::FrameError;

/// Deserialize the leading `FileHeader` from `buf`.
///
/// # Returns
/// - `Ok(FileHeader)` when at least 20 bytes are present.
/// - `Err(FrameError::Truncated)` otherwise.
#[inline]
pub fn decode_header(buf: &[u8]) -> Result<FileHeader, FrameError> {
    if buf.len() < FileHeader::LEN {
        return Err(FrameError::Truncated {
            what: "file header",
            need: FileHeader::LEN,
            have: buf.len(),
        });
    }

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&buf[..SALT_LEN]);
    let chunk_count = BigEndian::read_u32(&buf[SALT_LEN..FileHeader::LEN]);

    Ok(FileHeader { salt, chunk_count })
}
