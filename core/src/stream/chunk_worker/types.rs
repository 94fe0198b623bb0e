use std::fmt;
use std::time::{Duration, Instant};

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::crypto::{CryptoError, PaddingError};
use crate::stream::framing::FrameError;

/// Direction of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Encrypt,
    Decrypt,
}

impl Operation {
    pub const fn name(self) -> &'static str {
        match self {
            Operation::Encrypt => "encrypt",
            Operation::Decrypt => "decrypt",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a single chunk failed. Captured per chunk, aggregated by the
/// orchestrator once the pool is drained.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChunkFailure {
    #[error("padding validation failed: {0}")]
    PaddingValidation(PaddingError),

    #[error("malformed frame: {0}")]
    FrameFormat(FrameError),

    #[error("cipher failure: {0}")]
    Cipher(String),

    /// Dispatcher sent an id with no chunk behind it.
    #[error("unknown chunk id {0}")]
    UnknownChunk(u32),
}

impl From<CryptoError> for ChunkFailure {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::Padding(p) => ChunkFailure::PaddingValidation(p),
            CryptoError::Frame(f) => ChunkFailure::FrameFormat(f),
            other => ChunkFailure::Cipher(other.to_string()),
        }
    }
}

/// Outcome of one chunk on one worker.
#[derive(Debug, Clone)]
pub struct WorkResult {
    pub chunk_id: u32,
    pub worker_id: usize,
    pub start: Instant,
    pub end: Instant,
    pub outcome: Result<Bytes, ChunkFailure>,
}

impl WorkResult {
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn duration(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }
}

/// The per-chunk operation executed by workers.
///
/// Implementations are shared by reference across all workers, so they must
/// be `Sync` and must not rely on interior mutation between chunks.
pub trait ChunkProcessor: Sync {
    fn operation(&self) -> Operation;

    /// Transform one chunk: plaintext → frame on encrypt, frame → plaintext
    /// on decrypt.
    fn process(&self, chunk_id: u32, input: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
