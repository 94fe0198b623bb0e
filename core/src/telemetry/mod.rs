//! telemetry/mod.rs
//! Run telemetry: counters, stage timers, the Gantt timeline and the final
//! run summary.
//!
//! Design notes:
//! - Counters and the timeline are only touched by the collecting thread, so
//!   workers never contend on shared telemetry state.
//! - Everything exported to report consumers is serde-serializable.

pub mod counters;
pub mod timers;
pub mod gantt;
pub mod snapshot;

pub use counters::*;
pub use timers::*;
pub use gantt::*;
pub use snapshot::*;
