//! stream/mod.rs
//! Chunked, scheduled, parallel encryption pipeline.
//!
//! Layers, leaves first:
//! - `chunking` / `framing`: plaintext chunks and the on-disk frame layout
//! - `chunk_worker`: per-chunk cipher work and the worker loop
//! - `pipeline`: fixed worker pool, dispatch and result collection
//! - `core`: the orchestrator and public entry points

pub mod chunking;
pub mod framing;
pub mod chunk_worker;
pub mod parallelism;
pub mod pipeline;
pub mod io;
pub mod core;

pub use chunking::{split, Chunk};
pub use parallelism::ParallelismProfile;
pub use pipeline::{collect_results, PoolRun, WorkerPool};
pub use io::{default_output_path, InputSource, OutputLocation, OutputSink};
pub use self::core::{
    decrypt, decrypt_bytes, decrypt_file, encrypt, encrypt_bytes, encrypt_file, Orchestrator,
    Progress, RunOutput, RunState,
};
