//! config.rs
//! Run configuration: algorithm, quantum, chunking and pool sizing.
//!
//! Loaded from code (builder) or JSON; missing JSON fields fall back to
//! defaults. The algorithm name is kept as text; `scheduling()` resolves it
//! together with the quantum before a run reads input or derives a key.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_ALGORITHM, DEFAULT_CHUNK_SIZE, DEFAULT_QUEUE_CAP, MAX_CHUNK_SIZE, MAX_WORKERS,
    PBKDF2_ITERATIONS,
};
use crate::scheduler::{Algorithm, SchedulerError};
use crate::stream::parallelism::ParallelismProfile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("chunk size {size} must be in 1..={max}")]
    ChunkSize { size: usize, max: usize },

    #[error("worker count {count} must be in 1..={max}")]
    Workers { count: usize, max: usize },

    #[error("queue capacity must be non-zero")]
    QueueCapacity,

    #[error("input splits into {count} chunks, more than a u32 chunk id allows")]
    TooManyChunks { count: usize },

    #[error("KDF iteration count must be non-zero")]
    KdfIterations,

    #[error("malformed config: {0}")]
    Parse(String),
}

/// Everything a single encrypt or decrypt run needs besides input and
/// password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Scheduling algorithm name (`"FCFS"`, `"SJF"`, `"Round Robin"`).
    pub algorithm: String,
    /// Round-robin quantum in size units (milliseconds in the UI).
    pub quantum: Option<u32>,
    /// Plaintext bytes per chunk. Ignored on decrypt, where the file decides.
    pub chunk_size: usize,
    /// Worker pool size.
    pub workers: usize,
    /// Bounded dispatch channel capacity.
    pub queue_capacity: usize,
    /// PBKDF2 rounds; must match between encrypt and decrypt.
    pub kdf_iterations: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        let profile = ParallelismProfile::dynamic();
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            quantum: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: profile.workers,
            queue_capacity: profile.queue_capacity,
            kdf_iterations: PBKDF2_ITERATIONS,
        }
    }
}

impl RunConfig {
    pub fn builder() -> RunConfigBuilder {
        RunConfigBuilder::default()
    }

    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: RunConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 || self.chunk_size > MAX_CHUNK_SIZE {
            return Err(ConfigError::ChunkSize { size: self.chunk_size, max: MAX_CHUNK_SIZE });
        }
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::Workers { count: self.workers, max: MAX_WORKERS });
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::QueueCapacity);
        }
        if self.kdf_iterations == 0 {
            return Err(ConfigError::KdfIterations);
        }
        Ok(())
    }

    /// Resolve the configured algorithm name.
    pub fn parse_algorithm(&self) -> Result<Algorithm, SchedulerError> {
        self.algorithm.parse()
    }

    /// Algorithm plus effective quantum. Round robin needs a non-zero
    /// quantum; the others run without one.
    pub fn scheduling(&self) -> Result<(Algorithm, Option<u32>), SchedulerError> {
        let algorithm = self.parse_algorithm()?;
        if !algorithm.requires_quantum() {
            return Ok((algorithm, None));
        }
        match self.quantum {
            Some(q) if q > 0 => Ok((algorithm, Some(q))),
            _ => Err(SchedulerError::MissingQuantum),
        }
    }
}

/// Builder over `RunConfig::default()`.
#[derive(Debug, Clone, Default)]
pub struct RunConfigBuilder {
    cfg: RunConfig,
}

impl RunConfigBuilder {
    pub fn algorithm(mut self, name: impl Into<String>) -> Self {
        self.cfg.algorithm = name.into();
        self
    }

    pub fn quantum(mut self, quantum: u32) -> Self {
        self.cfg.quantum = Some(quantum);
        self
    }

    pub fn chunk_size(mut self, size: usize) -> Self {
        self.cfg.chunk_size = size;
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.cfg.workers = workers;
        self
    }

    pub fn queue_capacity(mut self, cap: usize) -> Self {
        self.cfg.queue_capacity = cap;
        self
    }

    pub fn kdf_iterations(mut self, iterations: u32) -> Self {
        self.cfg.kdf_iterations = iterations;
        self
    }

    pub fn build(self) -> Result<RunConfig, ConfigError> {
        self.cfg.validate()?;
        Ok(self.cfg)
    }
}
