//! Chunk-level workers.
//!
//! A worker pulls chunk ids from the dispatch channel, runs one cipher
//! operation per chunk and reports a timed `WorkResult`.
//!
//! They are:
//! - CPU-bound
//! - Stateless between chunks
//! - Fully parallelizable

pub mod types;
pub mod cipher;
pub mod worker;

pub use types::{
    ChunkFailure,
    ChunkProcessor,
    Operation,
    WorkResult,
};
pub use cipher::{CbcChunkProcessor, decrypt_chunk, encrypt_chunk, encrypt_chunk_with_iv};
pub use worker::ChunkWorker;
