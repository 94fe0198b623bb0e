use byteorder::{BigEndian, ByteOrder};
use bytes::Bytes;

use crate::constants::{FRAME_LEN_PREFIX, IV_LEN};
use crate::stream::framing::types::{FrameError, ChunkFrame};

/// Split an encoded frame into IV and ciphertext.
///
/// Zero-copy; the ciphertext length is not checked here (the cipher rejects
/// unaligned input).
pub fn decode_frame(wire: &[u8]) -> Result<ChunkFrame<'_>, FrameError> {
    if wire.len() < IV_LEN {
        return Err(FrameError::Truncated {
            what: "frame",
            need: IV_LEN,
            have: wire.len(),
        });
    }

    let (iv, ciphertext) = wire.split_at(IV_LEN);
    let iv: &[u8; IV_LEN] = iv.try_into().map_err(|_| FrameError::Truncated {
        what: "frame iv",
        need: IV_LEN,
        have: iv.len(),
    })?;

    Ok(ChunkFrame { iv, ciphertext })
}

/// Parse exactly `chunk_count` length-prefixed frames out of `body`.
///
/// Returned frames are zero-copy slices of `body`, indexed by chunk id.
///
/// Errors:
/// - `Truncated` when a prefix or frame body runs past the end of `body`
/// - `FrameTooShort` when a declared length cannot hold an IV
/// - `TrailingBytes` when data follows the last declared frame
///
/// `chunk_count` comes from an unauthenticated header; it is checked against
/// the smallest possible body before anything is allocated.
pub fn read_frames(body: &Bytes, chunk_count: u32) -> Result<Vec<Bytes>, FrameError> {
    let min_frame = FRAME_LEN_PREFIX + IV_LEN;
    let need = (chunk_count as usize).saturating_mul(min_frame);
    if body.len() < need {
        return Err(FrameError::Truncated {
            what: "frame body",
            need,
            have: body.len(),
        });
    }

    let mut frames = Vec::with_capacity(chunk_count as usize);
    let mut off = 0usize;

    for index in 0..chunk_count {
        let remaining = body.len() - off;
        if remaining < FRAME_LEN_PREFIX {
            return Err(FrameError::Truncated {
                what: "frame length prefix",
                need: FRAME_LEN_PREFIX,
                have: remaining,
            });
        }
        let len = BigEndian::read_u32(&body[off..off + FRAME_LEN_PREFIX]) as usize;
        off += FRAME_LEN_PREFIX;

        if len < IV_LEN {
            return Err(FrameError::FrameTooShort { index, len, min: IV_LEN });
        }

        let remaining = body.len() - off;
        if remaining < len {
            return Err(FrameError::Truncated {
                what: "frame body",
                need: len,
                have: remaining,
            });
        }

        frames.push(body.slice(off..off + len));
        off += len;
    }

    if off != body.len() {
        return Err(FrameError::TrailingBytes { extra: body.len() - off });
    }

    Ok(frames)
}
