//! telemetry/gantt.rs
//! Per-chunk execution timeline of a real run.
//!
//! Offsets are seconds relative to the moment the worker pool started.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::stream::chunk_worker::WorkResult;

/// Smallest span recorded for a chunk. Keeps `start < end` on platforms whose
/// clock cannot resolve a very short cipher call.
const MIN_SPAN: Duration = Duration::from_nanos(1);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttEntry {
    pub chunk_id: u32,
    pub worker_id: usize,
    pub start_offset_seconds: f64,
    pub end_offset_seconds: f64,
}

#[derive(Debug, Clone)]
pub struct TimelineRecorder {
    run_start: Instant,
    entries: Vec<GanttEntry>,
}

impl TimelineRecorder {
    pub fn new(run_start: Instant) -> Self {
        Self {
            run_start,
            entries: Vec::new(),
        }
    }

    pub fn with_capacity(run_start: Instant, capacity: usize) -> Self {
        Self {
            run_start,
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, result: &WorkResult) {
        let start = result.start.saturating_duration_since(self.run_start);
        let end = result
            .end
            .saturating_duration_since(self.run_start)
            .max(start + MIN_SPAN);

        self.entries.push(GanttEntry {
            chunk_id: result.chunk_id,
            worker_id: result.worker_id,
            start_offset_seconds: start.as_secs_f64(),
            end_offset_seconds: end.as_secs_f64(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by start offset, ties by chunk id.
    pub fn finish(mut self) -> Vec<GanttEntry> {
        self.entries.sort_by(|a, b| {
            a.start_offset_seconds
                .total_cmp(&b.start_offset_seconds)
                .then(a.chunk_id.cmp(&b.chunk_id))
        });
        self.entries
    }
}
