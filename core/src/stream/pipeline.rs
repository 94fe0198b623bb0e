// ## 📂 File: `src/stream/pipeline.rs`
// ## Pure pool wiring (no crypto logic)

//! Fixed-size worker pool driven by a dispatch order.
//!
//! Topology:
//! - one dispatcher thread feeding chunk ids, in schedule order, into a
//!   bounded channel
//! - `workers` identical threads pulling from that channel
//! - an unbounded result channel drained by the caller's thread
//!
//! Design notes:
//! - Everything runs inside a caller-provided `thread::scope`, so workers
//!   borrow the chunk table and processor without `Arc`.
//! - Result order is completion order; reassembly is done by chunk id.
//! - Cancellation is checked between chunks, never inside one.

use std::thread::Scope;
use std::time::Instant;

use bytes::Bytes;
use crossbeam::channel::{bounded, unbounded, Receiver, RecvTimeoutError};
use tracing::{debug, info};

use crate::cancel::CancellationToken;
use crate::constants::CANCEL_POLL_INTERVAL;
use crate::stream::chunk_worker::{ChunkProcessor, ChunkWorker, WorkResult};
use crate::stream::parallelism::ParallelismProfile;
use crate::types::StreamError;

#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    profile: ParallelismProfile,
}

/// Handle to a started pool: the result stream plus the instant the first
/// worker was spawned (Gantt offsets are relative to it).
pub struct PoolRun {
    pub results: Receiver<WorkResult>,
    pub started_at: Instant,
    pub expected: usize,
}

impl WorkerPool {
    pub fn new(profile: ParallelismProfile) -> Self {
        Self { profile }
    }

    #[inline]
    pub fn workers(&self) -> usize {
        self.profile.workers
    }

    /// Spawn workers and the dispatcher on `scope` and return immediately.
    ///
    /// Each id in `order` is sent exactly once. The dispatcher stops early
    /// if the token is cancelled or every worker is gone.
    pub fn start<'scope, 'env, P>(
        &self,
        scope: &'scope Scope<'scope, 'env>,
        processor: &'env P,
        chunks: &'env [Bytes],
        order: Vec<u32>,
        cancel: &'env CancellationToken,
    ) -> PoolRun
    where
        P: ChunkProcessor,
    {
        let workers = self.profile.workers.max(1);
        let expected = order.len();

        // ---- Channels ----
        let (job_tx, job_rx) = bounded::<u32>(self.profile.queue_capacity.max(1));
        let (res_tx, res_rx) = unbounded::<WorkResult>();

        let started_at = Instant::now();
        info!(workers, chunks = expected, "starting worker pool");

        // ---- Workers ----
        for i in 0..workers {
            let worker = ChunkWorker::new(i, processor, chunks, cancel);
            let rx = job_rx.clone();
            let tx = res_tx.clone();
            scope.spawn(move || worker.run(rx, tx));
        }

        // Only workers may hold these, so channel closure tracks worker exit.
        drop(job_rx);
        drop(res_tx);

        // ---- Dispatcher ----
        scope.spawn(move || {
            let mut sent = 0usize;
            for chunk_id in order {
                if cancel.is_cancelled() {
                    debug!(sent, "dispatcher observed cancellation");
                    break;
                }
                if job_tx.send(chunk_id).is_err() {
                    debug!(sent, "all workers gone, dispatcher stopping");
                    break;
                }
                sent += 1;
            }
            debug!(sent, "dispatcher finished, closing job channel");
        });

        PoolRun {
            results: res_rx,
            started_at,
            expected,
        }
    }

    /// Start the pool and collect every result into a vector (completion
    /// order). Convenience for callers that do not need streaming results.
    pub fn run<P>(
        &self,
        processor: &P,
        chunks: &[Bytes],
        order: &[u32],
        cancel: &CancellationToken,
    ) -> Result<Vec<WorkResult>, StreamError>
    where
        P: ChunkProcessor,
    {
        std::thread::scope(|scope| {
            let run = self.start(scope, processor, chunks, order.to_vec(), cancel);
            let mut out = Vec::with_capacity(run.expected);
            collect_results(&run, cancel, |r| out.push(r))?;
            Ok(out)
        })
    }
}

/// Drain exactly `run.expected` results, handing each to `on_result` on the
/// calling thread.
///
/// Errors:
/// - `Cancelled` once the token is observed set
/// - `Pipeline` if the workers exit before every result arrived
pub fn collect_results<F>(
    run: &PoolRun,
    cancel: &CancellationToken,
    mut on_result: F,
) -> Result<(), StreamError>
where
    F: FnMut(WorkResult),
{
    let mut received = 0usize;

    while received < run.expected {
        if cancel.is_cancelled() {
            info!(received, expected = run.expected, "collection cancelled");
            return Err(StreamError::Cancelled);
        }
        match run.results.recv_timeout(CANCEL_POLL_INTERVAL) {
            Ok(result) => {
                received += 1;
                on_result(result);
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                if cancel.is_cancelled() {
                    return Err(StreamError::Cancelled);
                }
                return Err(StreamError::Pipeline("workers exited before all results arrived"));
            }
        }
    }

    debug!(received, "all results collected");
    Ok(())
}
