// ## 📂 File: `src/scheduler/types.rs`

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Dispatch policy selected by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// First come, first served: registration order.
    Fcfs,
    /// Shortest job first: ascending size, ties by registration order.
    Sjf,
    /// Round robin over a simulated ready queue with a fixed quantum.
    RoundRobin,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [Algorithm::Fcfs, Algorithm::Sjf, Algorithm::RoundRobin];

    /// Canonical display name.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Fcfs => "FCFS",
            Algorithm::Sjf => "SJF",
            Algorithm::RoundRobin => "Round Robin",
        }
    }

    pub const fn requires_quantum(self) -> bool {
        matches!(self, Algorithm::RoundRobin)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SchedulerError;

    /// Case-insensitive; spaces, dashes and underscores are ignored, so
    /// `"Round Robin"`, `"round_robin"` and `"RR"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "fcfs" | "firstcomefirstserved" | "firstcomefirstserve" => Ok(Algorithm::Fcfs),
            "sjf" | "shortestjobfirst" => Ok(Algorithm::Sjf),
            "rr" | "roundrobin" => Ok(Algorithm::RoundRobin),
            _ => Err(SchedulerError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// A chunk registered with the scheduler.
///
/// Only `remaining` changes, and only on the round-robin working copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u32,
    pub size: u32,
    pub arrival_order: u32,
    pub remaining: u32,
}

impl Task {
    pub fn new(id: u32, size: u32, arrival_order: u32) -> Self {
        Self { id, size, arrival_order, remaining: size }
    }
}

/// Position of one task in the dispatch order handed to the worker pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub task_id: u32,
    pub algorithm: Algorithm,
    pub scheduled_rank: u32,
}

/// One simulated execution slice.
///
/// Round robin produces one per quantum; FCFS and SJF one per task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlice {
    pub task_id: u32,
    pub consumed: u32,
    pub remaining: u32,
}

/// Result of running a policy over a task list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub algorithm: Algorithm,
    pub quantum: Option<u32>,
    /// Exactly one entry per task, in dispatch order.
    pub entries: Vec<ScheduleEntry>,
    /// Simulated timeline (reporting only, never dispatched).
    pub slices: Vec<TimeSlice>,
}

impl Schedule {
    /// Task ids in the order they go to the worker pool.
    pub fn dispatch_order(&self) -> Vec<u32> {
        self.entries.iter().map(|e| e.task_id).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    #[error("unknown scheduling algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("round robin requires a quantum greater than zero")]
    MissingQuantum,
}
