//! cancel.rs
//! Cooperative cancellation shared by the dispatcher, workers and collector.
//!
//! `tokio_util`'s token is runtime-agnostic: `cancel()` and `is_cancelled()`
//! are plain synchronous calls, so OS worker threads poll it directly.
//! Workers check it between chunks, never mid-cipher.

pub use tokio_util::sync::CancellationToken;
