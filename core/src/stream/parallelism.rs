//! stream/parallelism.rs
//! Worker pool sizing.

use crate::constants::{DEFAULT_QUEUE_CAP, DEFAULT_WORKERS, MAX_WORKERS};

/// Parallelism configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelismProfile {
    pub workers: usize,
    pub queue_capacity: usize,
}

impl ParallelismProfile {
    pub fn new(workers: usize, queue_capacity: usize) -> Self {
        Self { workers, queue_capacity }
    }

    /// One worker per core, leaving one core free; never below one.
    pub fn dynamic() -> Self {
        let cores = num_cpus::get();
        let workers = match cores {
            0 => DEFAULT_WORKERS,
            n => n.saturating_sub(1).max(1),
        };

        Self {
            workers: workers.min(MAX_WORKERS),
            queue_capacity: DEFAULT_QUEUE_CAP,
        }
    }
}

impl Default for ParallelismProfile {
    fn default() -> Self {
        Self::dynamic()
    }
}
