use thiserror::Error;

use crate::constants::IV_LEN;

/// One chunk frame, borrowed from its encoded buffer.
///
/// Wire form is `iv (16) || ciphertext (n * 16)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkFrame<'a> {
    pub iv: &'a [u8; IV_LEN],
    pub ciphertext: &'a [u8],
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Buffer shorter than the fixed part being parsed.
    #[error("truncated {what}: need {need} bytes, have {have}")]
    Truncated {
        what: &'static str,
        need: usize,
        have: usize,
    },

    /// A frame length prefix is smaller than an IV.
    #[error("frame {index} declares length {len}, below the {min}-byte minimum")]
    FrameTooShort { index: u32, len: usize, min: usize },

    /// Bytes left over after the declared number of frames.
    #[error("{extra} trailing bytes after the last frame")]
    TrailingBytes { extra: usize },

    /// Frame or payload too large for a `u32` length prefix.
    #[error("frame length {len} overflows the u32 length prefix")]
    LengthOverflow { len: usize },
}
