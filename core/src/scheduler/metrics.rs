//! scheduler/metrics.rs
//! Simulated execution timeline and textbook scheduling metrics.
//!
//! The simulation is sequential and treats one size unit as one millisecond
//! of work. All tasks are assumed to arrive at time 0. These numbers describe
//! the policy, not the real concurrent run (see `telemetry::gantt` for that).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scheduler::types::{Algorithm, Schedule, Task};

/// Size units per simulated second.
const UNITS_PER_SECOND: f64 = 1000.0;

/// Summary of the registered task set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingStats {
    pub algorithm: Algorithm,
    pub total_tasks: usize,
    pub total_size: u64,
    pub average_size: f64,
    pub min_size: u32,
    pub max_size: u32,
    pub quantum: Option<u32>,
}

impl SchedulingStats {
    pub fn from_tasks(algorithm: Algorithm, quantum: Option<u32>, tasks: &[Task]) -> Self {
        let total_size: u64 = tasks.iter().map(|t| t.size as u64).sum();
        let average_size = if tasks.is_empty() {
            0.0
        } else {
            total_size as f64 / tasks.len() as f64
        };

        Self {
            algorithm,
            total_tasks: tasks.len(),
            total_size,
            average_size,
            min_size: tasks.iter().map(|t| t.size).min().unwrap_or(0),
            max_size: tasks.iter().map(|t| t.size).max().unwrap_or(0),
            quantum,
        }
    }
}

/// One task in the sequential simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedExecution {
    pub task_id: u32,
    pub start: f64,
    pub end: f64,
    pub duration: f64,
    pub size: u32,
}

/// Averages over a simulated timeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    pub average_turnaround: f64,
    pub average_waiting: f64,
    pub average_response: f64,
    /// Tasks per simulated second.
    pub throughput: f64,
    pub total_execution_time: f64,
}

/// Lay out the dispatch order back to back, each task taking
/// `size / 1000` seconds.
pub fn simulate_execution(schedule: &Schedule, tasks: &[Task]) -> Vec<SimulatedExecution> {
    let by_id: HashMap<u32, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    let mut clock = 0.0;

    schedule
        .entries
        .iter()
        .filter_map(|entry| by_id.get(&entry.task_id))
        .map(|task| {
            let duration = task.size as f64 / UNITS_PER_SECOND;
            let start = clock;
            clock += duration;
            SimulatedExecution {
                task_id: task.id,
                start,
                end: clock,
                duration,
                size: task.size,
            }
        })
        .collect()
}

/// Turnaround = completion, waiting = turnaround - burst, response = start.
pub fn calculate_metrics(timeline: &[SimulatedExecution]) -> SchedulingMetrics {
    let Some(last) = timeline.last() else {
        return SchedulingMetrics::default();
    };

    let n = timeline.len() as f64;
    let turnaround: f64 = timeline.iter().map(|e| e.end).sum();
    let waiting: f64 = timeline.iter().map(|e| e.end - e.duration).sum();
    let response: f64 = timeline.iter().map(|e| e.start).sum();
    let total = last.end;

    SchedulingMetrics {
        average_turnaround: turnaround / n,
        average_waiting: waiting / n,
        average_response: response / n,
        throughput: if total > 0.0 { n / total } else { 0.0 },
        total_execution_time: total,
    }
}
