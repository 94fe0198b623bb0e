//! scheduler/policy.rs
//! Dispatch ordering for FCFS, SJF and Round Robin.
//!
//! Round robin only decides *order*: the quantum timeline is simulated for
//! reporting, then collapsed so each task is dispatched once, at the rank of
//! its completing slice. In-flight cipher work is never preempted.

use std::collections::{HashMap, VecDeque};

use crate::scheduler::metrics::SchedulingStats;
use crate::scheduler::types::{Algorithm, Schedule, ScheduleEntry, SchedulerError, Task, TimeSlice};

/// Dispatch order for `tasks`: exactly one occurrence per task id.
pub fn compute_order(
    tasks: &[Task],
    algorithm: Algorithm,
    quantum: Option<u32>,
) -> Result<Vec<u32>, SchedulerError> {
    Ok(build_schedule(tasks, algorithm, quantum)?.dispatch_order())
}

/// Run `algorithm` over `tasks` and return the full schedule.
///
/// `quantum` is required (and must be non-zero) for round robin and ignored
/// otherwise.
pub fn build_schedule(
    tasks: &[Task],
    algorithm: Algorithm,
    quantum: Option<u32>,
) -> Result<Schedule, SchedulerError> {
    let (order, slices, quantum) = match algorithm {
        Algorithm::Fcfs => {
            let order = order_fcfs(tasks);
            let slices = full_slices(tasks, &order);
            (order, slices, None)
        }
        Algorithm::Sjf => {
            let order = order_sjf(tasks);
            let slices = full_slices(tasks, &order);
            (order, slices, None)
        }
        Algorithm::RoundRobin => {
            let q = match quantum {
                Some(q) if q > 0 => q,
                _ => return Err(SchedulerError::MissingQuantum),
            };
            let (order, slices) = simulate_round_robin(tasks, q);
            (order, slices, Some(q))
        }
    };

    let entries = order
        .into_iter()
        .enumerate()
        .map(|(rank, task_id)| ScheduleEntry {
            task_id,
            algorithm,
            scheduled_rank: rank as u32,
        })
        .collect();

    Ok(Schedule { algorithm, quantum, entries, slices })
}

/// Stable sort by arrival order.
fn order_fcfs(tasks: &[Task]) -> Vec<u32> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| t.arrival_order);
    sorted.into_iter().map(|t| t.id).collect()
}

/// Stable sort by size, ties broken by arrival order.
fn order_sjf(tasks: &[Task]) -> Vec<u32> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by_key(|t| (t.size, t.arrival_order));
    sorted.into_iter().map(|t| t.id).collect()
}

fn full_slices(tasks: &[Task], order: &[u32]) -> Vec<TimeSlice> {
    let by_id: HashMap<u32, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    order
        .iter()
        .filter_map(|id| by_id.get(id))
        .map(|t| TimeSlice { task_id: t.id, consumed: t.size, remaining: 0 })
        .collect()
}

/// Simulate the ready queue; returns (completion order, slice timeline).
fn simulate_round_robin(tasks: &[Task], quantum: u32) -> (Vec<u32>, Vec<TimeSlice>) {
    let mut ready: Vec<Task> = tasks.to_vec();
    ready.sort_by_key(|t| t.arrival_order);
    let mut ready: VecDeque<Task> = ready.into();

    let mut slices = Vec::new();
    let mut completed = Vec::with_capacity(tasks.len());

    while let Some(mut task) = ready.pop_front() {
        let consumed = quantum.min(task.remaining);
        task.remaining -= consumed;
        slices.push(TimeSlice {
            task_id: task.id,
            consumed,
            remaining: task.remaining,
        });

        if task.remaining > 0 {
            ready.push_back(task);
        } else {
            completed.push(task.id);
        }
    }

    (completed, slices)
}

/// Stateful front-end: register chunks, then schedule them.
#[derive(Debug, Clone)]
pub struct TaskScheduler {
    algorithm: Algorithm,
    quantum: Option<u32>,
    tasks: Vec<Task>,
}

impl TaskScheduler {
    pub fn new(algorithm: Algorithm, quantum: Option<u32>) -> Self {
        Self { algorithm, quantum, tasks: Vec::new() }
    }

    /// Parse `name` and build a scheduler; fails on unknown names.
    pub fn from_name(name: &str, quantum: Option<u32>) -> Result<Self, SchedulerError> {
        Ok(Self::new(name.parse()?, quantum))
    }

    /// Register a task; arrival order is registration order.
    pub fn add_task(&mut self, id: u32, size: u32) {
        let arrival_order = self.tasks.len() as u32;
        self.tasks.push(Task::new(id, size, arrival_order));
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn quantum(&self) -> Option<u32> {
        self.quantum
    }

    pub fn schedule(&self) -> Result<Schedule, SchedulerError> {
        build_schedule(&self.tasks, self.algorithm, self.quantum)
    }

    pub fn stats(&self) -> SchedulingStats {
        SchedulingStats::from_tasks(self.algorithm, self.quantum, &self.tasks)
    }

    /// Drop all registered tasks.
    pub fn reset(&mut self) {
        self.tasks.clear();
    }
}
