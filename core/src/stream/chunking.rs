//! stream/chunking.rs
//! Splits a fully buffered plaintext into fixed-size chunks.
//!
//! Chunks are zero-copy `Bytes` slices of the input buffer, so handing them to
//! workers costs a refcount bump, not a copy.

use bytes::Bytes;

use crate::config::ConfigError;
use crate::constants::MAX_CHUNK_SIZE;
use crate::types::StreamError;

/// One contiguous slice of the input, the unit of scheduling and encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub id: u32,
    pub bytes: Bytes,
}

impl Chunk {
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Split `data` into sequential, non-overlapping chunks of `chunk_size`
/// bytes. Ids are contiguous from 0; the last chunk may be shorter.
///
/// Errors:
/// - `EmptyInput` for zero-length data
/// - `Config` for a zero chunk size or more than `u32::MAX` chunks
pub fn split(data: &Bytes, chunk_size: usize) -> Result<Vec<Chunk>, StreamError> {
    if chunk_size == 0 {
        return Err(StreamError::Config(ConfigError::ChunkSize { size: 0, max: MAX_CHUNK_SIZE }));
    }
    if data.is_empty() {
        return Err(StreamError::EmptyInput);
    }

    let count = data.len().div_ceil(chunk_size);
    if count > u32::MAX as usize {
        return Err(StreamError::Config(ConfigError::TooManyChunks { count }));
    }

    let chunks = (0..count)
        .map(|i| {
            let start = i * chunk_size;
            let end = (start + chunk_size).min(data.len());
            Chunk {
                id: i as u32,
                bytes: data.slice(start..end),
            }
        })
        .collect();

    Ok(chunks)
}
