// ### `src/telemetry/counters.rs`

//! telemetry/counters.rs
//! Chunk and byte counters accumulated while collecting worker results.

use serde::{Deserialize, Serialize};

#[derive(Default, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryCounters {
    pub chunks_ok: u64,
    pub chunks_failed: u64,
    /// Bytes handed to workers (plaintext on encrypt, frames on decrypt).
    pub bytes_in: u64,
    /// Bytes produced by workers.
    pub bytes_out: u64,
    /// File header plus length prefixes.
    pub bytes_overhead: u64,
}

impl TelemetryCounters {
    /// Record one successful chunk.
    pub fn add_chunk(&mut self, in_len: usize, out_len: usize) {
        self.chunks_ok += 1;
        self.bytes_in += in_len as u64;
        self.bytes_out += out_len as u64;
    }

    /// Record one failed chunk; its input still counts as consumed.
    pub fn add_failure(&mut self, in_len: usize) {
        self.chunks_failed += 1;
        self.bytes_in += in_len as u64;
    }

    /// Record structural bytes (file header, frame prefixes).
    pub fn add_overhead(&mut self, len: usize) {
        self.bytes_overhead += len as u64;
    }

    pub fn chunks_total(&self) -> u64 {
        self.chunks_ok + self.chunks_failed
    }
}
