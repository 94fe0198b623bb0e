// ## src/telemetry/snapshot.rs

//! telemetry/snapshot.rs
//! Immutable summary of a finished run, exported to report consumers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scheduler::Algorithm;
use crate::stream::chunk_worker::Operation;
use crate::telemetry::timers::TelemetryTimer;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub operation: Operation,
    pub algorithm: Algorithm,
    /// Input size in bytes.
    pub file_size: u64,
    /// Output size in bytes.
    pub output_size: u64,
    pub duration_secs: f64,
    pub chunk_count: u32,
    pub worker_count: usize,
    /// Input bytes per wall-clock second.
    pub throughput_bytes_per_sec: f64,
    pub started_at: DateTime<Utc>,
}

impl RunSummary {
    #[allow(clippy::too_many_arguments)]
    pub fn from_run(
        operation: Operation,
        algorithm: Algorithm,
        started_at: DateTime<Utc>,
        file_size: u64,
        output_size: u64,
        chunk_count: u32,
        worker_count: usize,
        timer: &TelemetryTimer,
    ) -> Self {
        let duration_secs = timer.elapsed().as_secs_f64();
        let throughput = if duration_secs > 0.0 {
            file_size as f64 / duration_secs
        } else {
            0.0
        };

        Self {
            operation,
            algorithm,
            file_size,
            output_size,
            duration_secs,
            chunk_count,
            worker_count,
            throughput_bytes_per_sec: throughput,
            started_at,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
