//! Phase/task tree model.
//!
//! # Responsibility
//! - Define the canonical shape of a plan and its wire representation.
//! - Provide read helpers used by transitions, geometry and views.
//!
//! # Invariants
//! - `id` values are stable and never reused inside one plan.
//! - `Task::duration` is `Some(n)` with `n >= 1` for accepted input; `None`
//!   is the not-a-number value left behind by an uncoerced edit.
//! - The wire form is a bare JSON array of phases with camelCase fields.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a phase.
pub type PhaseId = Uuid;

/// Stable identifier of a task.
pub type TaskId = Uuid;

/// Name given to phases created from the toolbar.
pub const DEFAULT_PHASE_NAME: &str = "New Phase";
/// Name given to tasks created inside a phase.
pub const DEFAULT_TASK_NAME: &str = "New Task";
/// Duration in days given to new tasks.
pub const DEFAULT_TASK_DURATION_DAYS: u32 = 5;

/// Unit of work with a start date and a whole-day duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// Serialized as `YYYY-MM-DD`.
    pub start_date: NaiveDate,
    /// Serialized as `null` when the last edit did not coerce to a number.
    pub duration: Option<u32>,
}

impl Task {
    /// Creates a task with a generated id.
    pub fn new(name: impl Into<String>, start_date: NaiveDate, duration: Option<u32>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            duration,
        }
    }

    /// Exclusive end date (`start_date + duration`).
    ///
    /// Returns `None` when the duration is not a number or the end would
    /// overflow the calendar range.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let days = self.duration?;
        self.start_date
            .checked_add_signed(Duration::days(i64::from(days)))
    }
}

/// Named, colored group of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub id: PhaseId,
    pub name: String,
    /// Hex color string such as `#FF6B6B`.
    pub color: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Phase {
    /// Creates an empty phase with a generated id.
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
            tasks: Vec::new(),
        }
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub(crate) fn task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }
}

/// Top-level ordered list of phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    pub phases: Vec<Phase>,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_phases(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn phase(&self, id: PhaseId) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.id == id)
    }

    pub(crate) fn phase_mut(&mut self, id: PhaseId) -> Option<&mut Phase> {
        self.phases.iter_mut().find(|phase| phase.id == id)
    }

    /// Total number of tasks across all phases.
    pub fn task_count(&self) -> usize {
        self.phases.iter().map(|phase| phase.tasks.len()).sum()
    }
}
