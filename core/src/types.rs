use std::io;

use thiserror::Error;

use crate::{
    config::ConfigError,
    crypto::PaddingError,
    scheduler::SchedulerError,
    stream::chunk_worker::ChunkFailure,
    stream::framing::FrameError,
};

/// Unified run error covering configuration, framing, key derivation,
/// scheduling, per-chunk worker failures, I/O and cancellation.
/// - `From<T>` impls enable `?` across the pipeline.
/// - Structural errors are raised before any worker starts.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Plaintext input had zero length.
    #[error("input is empty")]
    EmptyInput,

    /// Scheduling algorithm name not recognised.
    #[error("unknown scheduling algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// Round robin selected without a positive quantum.
    #[error("round robin requires a quantum greater than zero")]
    MissingQuantum,

    /// Malformed file header or chunk frame.
    #[error("frame format error: {0}")]
    FrameFormat(#[from] FrameError),

    /// PBKDF2 failed (fatal, not retryable).
    #[error("password derivation failed: {0}")]
    PasswordDerivation(String),

    /// PKCS#7 padding did not validate.
    #[error("padding validation failed: {0}")]
    PaddingValidation(#[from] PaddingError),

    /// One or more chunks failed inside the worker pool.
    #[error("{} chunk(s) failed: {failed_chunk_ids:?}", failed_chunk_ids.len())]
    WorkerTask {
        /// Ascending ids of every failed chunk.
        failed_chunk_ids: Vec<u32>,
        /// Failure kind per chunk, same order as `failed_chunk_ids`.
        failures: Vec<ChunkFailure>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The cancellation token fired before the run finished.
    #[error("run cancelled")]
    Cancelled,

    /// Invalid run configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Internal channel wiring broke (a worker vanished).
    #[error("pipeline error: {0}")]
    Pipeline(&'static str),
}

impl StreamError {
    /// True when the run failed because chunk padding did not validate,
    /// which is what a wrong password almost always looks like.
    pub fn is_padding_failure(&self) -> bool {
        match self {
            StreamError::PaddingValidation(_) => true,
            StreamError::WorkerTask { failures, .. } => {
                !failures.is_empty()
                    && failures.iter().all(|f| matches!(f, ChunkFailure::PaddingValidation(_)))
            }
            _ => false,
        }
    }
}

impl From<SchedulerError> for StreamError {
    fn from(e: SchedulerError) -> Self {
        match e {
            SchedulerError::UnknownAlgorithm(name) => StreamError::UnknownAlgorithm(name),
            SchedulerError::MissingQuantum => StreamError::MissingQuantum,
        }
    }
}
