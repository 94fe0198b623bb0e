//! schedcrypt-core
//!
//! Chunked AES-256-CBC file encryption with scheduled parallel dispatch.
//! Pure Rust, no FFI.

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;
pub mod config;
pub mod cancel;

// Building blocks
pub mod crypto;
pub mod headers;
pub mod scheduler;
pub mod telemetry;

// Pipeline
pub mod stream;

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::cancel::CancellationToken;
    pub use crate::config::{ConfigError, RunConfig, RunConfigBuilder};
    pub use crate::scheduler::{Algorithm, Schedule, TaskScheduler};
    pub use crate::stream::chunk_worker::{ChunkFailure, Operation};
    pub use crate::stream::{
        decrypt, decrypt_bytes, decrypt_file, default_output_path, encrypt, encrypt_bytes,
        encrypt_file, InputSource, Orchestrator, OutputLocation, OutputSink, RunOutput, RunState,
    };
    pub use crate::telemetry::{GanttEntry, RunSummary};
    pub use crate::types::StreamError;
}
