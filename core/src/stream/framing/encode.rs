use crate::constants::{FRAME_LEN_PREFIX, IV_LEN};
use crate::stream::framing::types::FrameError;

/// Encode a frame into its canonical wire layout.
///
/// Layout:
///
/// ```text
/// [ iv (16) ]
/// [ ciphertext (M) ]
/// ```
pub fn encode_frame(iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(IV_LEN + ciphertext.len());
    out.extend_from_slice(iv);
    out.extend_from_slice(ciphertext);
    out
}

/// Append `frame` to `out` behind its big-endian `u32` length prefix.
///
/// ```text
/// [ frame_length (4, BE) ]
/// [ frame (frame_length) ]
/// ```
pub fn write_length_prefixed(out: &mut Vec<u8>, frame: &[u8]) -> Result<(), FrameError> {
    let len = u32::try_from(frame.len()).map_err(|_| FrameError::LengthOverflow { len: frame.len() })?;
    out.reserve(FRAME_LEN_PREFIX + frame.len());
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(frame);
    Ok(())
}
