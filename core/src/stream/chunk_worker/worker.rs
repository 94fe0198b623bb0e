// # 📂 `src/stream/chunk_worker/worker.rs`

use std::time::Instant;

use bytes::Bytes;
use crossbeam::channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::cancel::CancellationToken;
use super::types::{ChunkFailure, ChunkProcessor, WorkResult};

/// One pool worker. Borrows everything it needs for the duration of a run.
pub struct ChunkWorker<'a, P: ChunkProcessor> {
    pub id: usize,
    processor: &'a P,
    chunks: &'a [Bytes],
    cancel: &'a CancellationToken,
}

impl<'a, P: ChunkProcessor> ChunkWorker<'a, P> {
    pub fn new(
        id: usize,
        processor: &'a P,
        chunks: &'a [Bytes],
        cancel: &'a CancellationToken,
    ) -> Self {
        Self { id, processor, chunks, cancel }
    }

    /// Run loop: drain chunk ids from `rx` until it is closed and empty, or
    /// until cancellation is observed between chunks.
    pub fn run(self, rx: Receiver<u32>, tx: Sender<WorkResult>) {
        debug!(worker_id = self.id, "worker starting");
        let mut processed = 0usize;

        loop {
            if self.cancel.is_cancelled() {
                debug!(worker_id = self.id, "cancellation observed, exiting");
                break;
            }
            let Ok(chunk_id) = rx.recv() else {
                break;
            };
            if self.cancel.is_cancelled() {
                debug!(worker_id = self.id, chunk_id, "cancelled, dropping chunk");
                break;
            }

            let result = self.process_one(chunk_id);
            processed += 1;

            if tx.send(result).is_err() {
                debug!(worker_id = self.id, "result receiver gone, exiting");
                break;
            }
        }

        debug!(worker_id = self.id, processed, "worker finished");
    }

    /// Process a single chunk, capturing any failure into the result.
    pub fn process_one(&self, chunk_id: u32) -> WorkResult {
        let start = Instant::now();
        let outcome = match self.chunks.get(chunk_id as usize) {
            Some(input) => self
                .processor
                .process(chunk_id, input)
                .map(Bytes::from)
                .map_err(ChunkFailure::from),
            None => Err(ChunkFailure::UnknownChunk(chunk_id)),
        };
        let end = Instant::now();

        match &outcome {
            Ok(out) => debug!(
                worker_id = self.id,
                chunk_id,
                bytes = out.len(),
                micros = end.duration_since(start).as_micros() as u64,
                "chunk done"
            ),
            Err(e) => warn!(worker_id = self.id, chunk_id, error = %e, "chunk failed"),
        }

        WorkResult {
            chunk_id,
            worker_id: self.id,
            start,
            end,
            outcome,
        }
    }
}
