// ## 📂 File: `src/stream/core.rs`
// ## Orchestrator state machine + stable public API

//! Orchestrator: one encrypt or decrypt run, end to end.
//!
//! ```text
//! Idle → Splitting → Scheduling → Dispatching → Collecting → Reassembling → Done
//!   └──────────────────────── any error ─────────────────────────────→ Failed
//! ```
//!
//! Design notes:
//! - Structural errors (config, header, frames, KDF, schedule) abort before
//!   any worker starts.
//! - Per-chunk failures are drained first and then reported together,
//!   ascending by chunk id.
//! - Output is only emitted after every chunk succeeded.

use std::fmt;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use bytes::Bytes;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::cancel::CancellationToken;
use crate::config::RunConfig;
use crate::constants::{FRAME_LEN_PREFIX, SALT_LEN};
use crate::crypto::{derive_key, generate_salt};
use crate::headers::{decode_header, encode_header, FileHeader};
use crate::scheduler::{Schedule, TaskScheduler};
use crate::stream::chunk_worker::{CbcChunkProcessor, ChunkFailure, Operation};
use crate::stream::chunking::split;
use crate::stream::framing::{read_frames, write_length_prefixed};
use crate::stream::io::{default_output_path, read_input, write_output, InputSource, OutputLocation, OutputSink};
use crate::stream::parallelism::ParallelismProfile;
use crate::stream::pipeline::{collect_results, WorkerPool};
use crate::telemetry::{
    GanttEntry, RunSummary, Stage, StageTimes, TelemetryCounters, TelemetryTimer, TimelineRecorder,
};
use crate::types::StreamError;

/// Progress sink: receives `completed / chunk_count` after each successful
/// chunk, on the collecting thread.
pub type Progress<'a> = Option<&'a mut dyn FnMut(f64)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunState {
    Idle,
    Splitting,
    Scheduling,
    Dispatching,
    Collecting,
    Reassembling,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle         => "idle",
            RunState::Splitting    => "splitting",
            RunState::Scheduling   => "scheduling",
            RunState::Dispatching  => "dispatching",
            RunState::Collecting   => "collecting",
            RunState::Reassembling => "reassembling",
            RunState::Done         => "done",
            RunState::Failed       => "failed",
        };
        f.write_str(name)
    }
}

/// Everything a finished run hands back to the caller.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub operation: Operation,
    pub output: OutputLocation,
    pub chunk_count: u32,
    /// One entry per chunk, sorted by start offset.
    pub gantt: Vec<GanttEntry>,
    pub schedule: Schedule,
    pub elapsed: Duration,
    pub counters: TelemetryCounters,
    pub stage_times: StageTimes,
    pub summary: RunSummary,
    /// Every state the orchestrator passed through, `Idle` first.
    pub states: Vec<RunState>,
}

impl RunOutput {
    pub fn bytes(&self) -> Option<&[u8]> {
        self.output.bytes()
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        match self.output {
            OutputLocation::Memory(v) => Some(v),
            OutputLocation::File { .. } => None,
        }
    }
}

#[derive(Debug)]
pub struct Orchestrator {
    config: RunConfig,
    cancel: CancellationToken,
    state: RunState,
    history: Vec<RunState>,
}

impl Orchestrator {
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            cancel: CancellationToken::new(),
            state: RunState::Idle,
            history: vec![RunState::Idle],
        }
    }

    /// Share an externally owned token, e.g. one wired to a UI cancel button.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    pub fn encrypt(
        &mut self,
        input: InputSource,
        output: OutputSink,
        password: &[u8],
        progress: Progress<'_>,
    ) -> Result<RunOutput, StreamError> {
        self.run(Operation::Encrypt, input, output, password, progress)
    }

    pub fn decrypt(
        &mut self,
        input: InputSource,
        output: OutputSink,
        password: &[u8],
        progress: Progress<'_>,
    ) -> Result<RunOutput, StreamError> {
        self.run(Operation::Decrypt, input, output, password, progress)
    }

    /// Execute one run. The orchestrator can be reused; each run starts
    /// from `Idle` with a fresh state history.
    pub fn run(
        &mut self,
        op: Operation,
        input: InputSource,
        output: OutputSink,
        password: &[u8],
        progress: Progress<'_>,
    ) -> Result<RunOutput, StreamError> {
        self.state = RunState::Idle;
        self.history = vec![RunState::Idle];

        match self.execute(op, input, output, password, progress) {
            Ok(mut out) => {
                out.states = self.history.clone();
                Ok(out)
            }
            Err(e) => {
                warn!(operation = %op, state = %self.state, error = %e, "run failed");
                self.transition(RunState::Failed);
                Err(e)
            }
        }
    }

    fn transition(&mut self, next: RunState) {
        info!(from = %self.state, to = %next, "state transition");
        self.state = next;
        self.history.push(next);
    }

    fn check_cancelled(&self) -> Result<(), StreamError> {
        if self.cancel.is_cancelled() {
            return Err(StreamError::Cancelled);
        }
        Ok(())
    }

    fn execute(
        &mut self,
        op: Operation,
        input: InputSource,
        output: OutputSink,
        password: &[u8],
        mut progress: Progress<'_>,
    ) -> Result<RunOutput, StreamError> {
        self.config.validate()?;
        let (algorithm, quantum) = self.config.scheduling()?;
        let cfg = self.config.clone();
        let started_at = Utc::now();
        let mut timer = TelemetryTimer::new();
        let mut counters = TelemetryCounters::default();

        let data = timer.time(Stage::Read, || read_input(input))?;
        let file_size = data.len() as u64;
        info!(
            operation = %op,
            bytes = file_size,
            algorithm = %cfg.algorithm,
            workers = cfg.workers,
            "run starting"
        );

        // ---- Splitting ----
        self.transition(RunState::Splitting);
        self.check_cancelled()?;
        if data.is_empty() {
            return Err(StreamError::EmptyInput);
        }

        let (salt, inputs) = match op {
            Operation::Encrypt => {
                let chunks = timer.time(Stage::Split, || split(&data, cfg.chunk_size))?;
                let inputs: Vec<Bytes> = chunks.into_iter().map(|c| c.bytes).collect();
                (generate_salt(), inputs)
            }
            Operation::Decrypt => {
                let (header, frames) = timer.time(Stage::Split, || parse_encrypted(&data))?;
                counters.add_overhead(FileHeader::LEN + frames.len() * FRAME_LEN_PREFIX);
                (header.salt, frames)
            }
        };
        let chunk_count = inputs.len() as u32;

        let key = timer
            .time(Stage::Derive, || derive_key(password, &salt, cfg.kdf_iterations))
            .map_err(|e| StreamError::PasswordDerivation(e.to_string()))?;

        // ---- Scheduling ----
        self.transition(RunState::Scheduling);
        self.check_cancelled()?;
        let mut scheduler = TaskScheduler::new(algorithm, quantum);
        for (id, chunk) in inputs.iter().enumerate() {
            scheduler.add_task(id as u32, task_size(chunk.len()));
        }
        let schedule = timer.time(Stage::Schedule, || scheduler.schedule())?;
        info!(%algorithm, chunks = chunk_count, "schedule built");

        // ---- Dispatching / Collecting ----
        let processor = CbcChunkProcessor::new(key, op);
        let pool = WorkerPool::new(ParallelismProfile::new(cfg.workers, cfg.queue_capacity));
        let order = schedule.dispatch_order();
        let cancel = self.cancel.clone();
        let total = inputs.len();

        let mut slots: Vec<Option<Bytes>> = vec![None; total];
        let mut failures: Vec<(u32, ChunkFailure)> = Vec::new();
        let mut completed = 0usize;
        let process_start = Instant::now();

        let gantt = thread::scope(|scope| -> Result<Vec<GanttEntry>, StreamError> {
            self.transition(RunState::Dispatching);
            let run = pool.start(scope, &processor, &inputs, order, &cancel);

            self.transition(RunState::Collecting);
            let mut recorder = TimelineRecorder::with_capacity(run.started_at, total);
            collect_results(&run, &cancel, |result| {
                recorder.record(&result);
                let idx = result.chunk_id as usize;
                let in_len = inputs.get(idx).map_or(0, Bytes::len);

                match result.outcome {
                    Ok(out) => {
                        counters.add_chunk(in_len, out.len());
                        if let Some(slot) = slots.get_mut(idx) {
                            *slot = Some(out);
                        }
                        completed += 1;
                        if let Some(cb) = progress.as_deref_mut() {
                            cb(completed as f64 / total as f64);
                        }
                    }
                    Err(failure) => {
                        counters.add_failure(in_len);
                        failures.push((result.chunk_id, failure));
                    }
                }
            })?;

            Ok(recorder.finish())
        })?;
        timer.add_stage_time(Stage::Process, process_start.elapsed());

        if !failures.is_empty() {
            failures.sort_by_key(|(id, _)| *id);
            let (failed_chunk_ids, failures): (Vec<u32>, Vec<ChunkFailure>) =
                failures.into_iter().unzip();
            return Err(StreamError::WorkerTask { failed_chunk_ids, failures });
        }

        // ---- Reassembling ----
        self.transition(RunState::Reassembling);
        let payload = timer.time(Stage::Reassemble, || reassemble(op, &salt, slots, &mut counters))?;
        let location = timer.time(Stage::Write, || write_output(output, payload))?;
        timer.finish();

        let summary = RunSummary::from_run(
            op,
            algorithm,
            started_at,
            file_size,
            location.len(),
            chunk_count,
            cfg.workers,
            &timer,
        );
        info!(
            operation = %op,
            chunks = counters.chunks_total(),
            output_bytes = location.len(),
            secs = summary.duration_secs,
            "run finished"
        );
        self.transition(RunState::Done);

        Ok(RunOutput {
            operation: op,
            output: location,
            chunk_count,
            gantt,
            schedule,
            elapsed: timer.elapsed(),
            counters,
            stage_times: timer.stage_times.clone(),
            summary,
            states: Vec::new(),
        })
    }
}

/// Header + frames of an encrypted file. A header announcing zero chunks is
/// treated as empty input.
fn parse_encrypted(data: &Bytes) -> Result<(FileHeader, Vec<Bytes>), StreamError> {
    let header = decode_header(data)?;
    if header.chunk_count == 0 {
        return Err(StreamError::EmptyInput);
    }
    let frames = read_frames(&data.slice(FileHeader::LEN..), header.chunk_count)?;
    Ok((header, frames))
}

/// Scheduler size for a chunk: its byte length, saturated to `u32`.
fn task_size(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

fn reassemble(
    op: Operation,
    salt: &[u8; SALT_LEN],
    slots: Vec<Option<Bytes>>,
    counters: &mut TelemetryCounters,
) -> Result<Vec<u8>, StreamError> {
    let parts = slots
        .into_iter()
        .collect::<Option<Vec<Bytes>>>()
        .ok_or(StreamError::Pipeline("chunk result missing at reassembly"))?;

    match op {
        Operation::Encrypt => {
            let body: usize = parts.iter().map(|p| p.len() + FRAME_LEN_PREFIX).sum();
            let mut out = Vec::with_capacity(FileHeader::LEN + body);

            let header = FileHeader::new(*salt, parts.len() as u32);
            out.extend_from_slice(&encode_header(&header));
            counters.add_overhead(FileHeader::LEN);

            for frame in &parts {
                write_length_prefixed(&mut out, frame)?;
                counters.add_overhead(FRAME_LEN_PREFIX);
            }
            Ok(out)
        }
        Operation::Decrypt => {
            let len: usize = parts.iter().map(Bytes::len).sum();
            let mut out = Vec::with_capacity(len);
            for part in &parts {
                out.extend_from_slice(part);
            }
            Ok(out)
        }
    }
}

// ============================================================
// Public API
// ============================================================

/// Encrypt `input` into `output` with a fresh salt and per-chunk IVs.
pub fn encrypt(
    input: InputSource,
    output: OutputSink,
    password: &[u8],
    config: &RunConfig,
    progress: Progress<'_>,
) -> Result<RunOutput, StreamError> {
    Orchestrator::new(config.clone()).encrypt(input, output, password, progress)
}

/// Decrypt a file produced by `encrypt`. `config.chunk_size` is ignored.
pub fn decrypt(
    input: InputSource,
    output: OutputSink,
    password: &[u8],
    config: &RunConfig,
    progress: Progress<'_>,
) -> Result<RunOutput, StreamError> {
    Orchestrator::new(config.clone()).decrypt(input, output, password, progress)
}

pub fn encrypt_bytes(data: &[u8], password: &[u8], config: &RunConfig) -> Result<Vec<u8>, StreamError> {
    encrypt(data.into(), OutputSink::Memory, password, config, None)?
        .into_bytes()
        .ok_or(StreamError::Pipeline("memory sink returned no bytes"))
}

pub fn decrypt_bytes(data: &[u8], password: &[u8], config: &RunConfig) -> Result<Vec<u8>, StreamError> {
    decrypt(data.into(), OutputSink::Memory, password, config, None)?
        .into_bytes()
        .ok_or(StreamError::Pipeline("memory sink returned no bytes"))
}

/// Encrypt a file. `output` defaults to `<input>.enc`.
pub fn encrypt_file(
    input: &Path,
    output: Option<&Path>,
    password: &[u8],
    config: &RunConfig,
) -> Result<RunOutput, StreamError> {
    let out = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, Operation::Encrypt));
    encrypt(
        InputSource::File(input.to_path_buf()),
        OutputSink::File(out),
        password,
        config,
        None,
    )
}

/// Decrypt a file. `output` defaults to the input with `.enc` stripped, or
/// `<input>.dec`.
pub fn decrypt_file(
    input: &Path,
    output: Option<&Path>,
    password: &[u8],
    config: &RunConfig,
) -> Result<RunOutput, StreamError> {
    let out = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, Operation::Decrypt));
    decrypt(
        InputSource::File(input.to_path_buf()),
        OutputSink::File(out),
        password,
        config,
        None,
    )
}
