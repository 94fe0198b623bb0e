//! scheduler/mod.rs
//! CPU-scheduling policies repurposed to order chunk dispatch.
//!
//! - `types`: tasks, schedule entries, algorithm registry
//! - `policy`: FCFS / SJF / Round Robin ordering
//! - `metrics`: simulated timeline and classic scheduling metrics
//!
//! Pure computation: no I/O, no threads.

pub mod types;
pub mod policy;
pub mod metrics;

pub use types::*;
pub use policy::*;
pub use metrics::*;
