//! Pure plan transitions.
//!
//! # Responsibility
//! - Implement every phase/task edit as `&Plan -> Plan`.
//! - Coerce raw duration input the way the editor's number field does.
//!
//! # Invariants
//! - New phases take `palette_color(current phase count)`.
//! - New tasks start on the supplied `today` with the default duration.
//! - Unknown phase/task ids return a plan equal to the input.

use crate::model::palette::palette_color;
use crate::model::plan::{
    Phase, PhaseId, Plan, Task, TaskId, DEFAULT_PHASE_NAME, DEFAULT_TASK_DURATION_DAYS,
    DEFAULT_TASK_NAME,
};
use chrono::NaiveDate;

/// Partial task update merged by [`update_task`].
///
/// `duration: Some(None)` stores the not-a-number value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub duration: Option<Option<u32>>,
}

impl TaskPatch {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_duration(mut self, duration: Option<u32>) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the duration from raw text through [`coerce_duration`].
    pub fn with_duration_text(self, raw: &str) -> Self {
        self.with_duration(coerce_duration(raw))
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.start_date.is_none() && self.duration.is_none()
    }
}

/// Parses the integer prefix of `raw` as a whole-day duration.
///
/// Leading whitespace and one sign are accepted; parsing stops at the first
/// non-digit. Missing digits, zero, negative values and overflow give `None`.
pub fn coerce_duration(raw: &str) -> Option<u32> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 || negative {
        return None;
    }
    match rest[..digits_len].parse::<u32>() {
        Ok(0) | Err(_) => None,
        Ok(value) => Some(value),
    }
}

/// Appends a default phase colored by the current phase count.
pub fn add_phase(plan: &Plan) -> Plan {
    let mut next = plan.clone();
    next.phases
        .push(Phase::new(DEFAULT_PHASE_NAME, palette_color(plan.len())));
    next
}

/// Appends a default task starting `today` to the phase.
pub fn add_task(plan: &Plan, phase_id: PhaseId, today: NaiveDate) -> Plan {
    let mut next = plan.clone();
    if let Some(phase) = next.phase_mut(phase_id) {
        phase.tasks.push(Task::new(
            DEFAULT_TASK_NAME,
            today,
            Some(DEFAULT_TASK_DURATION_DAYS),
        ));
    }
    next
}

pub fn rename_phase(plan: &Plan, phase_id: PhaseId, name: impl Into<String>) -> Plan {
    let mut next = plan.clone();
    if let Some(phase) = next.phase_mut(phase_id) {
        phase.name = name.into();
    }
    next
}

/// Stores `color` as given; validation belongs to the caller.
pub fn recolor_phase(plan: &Plan, phase_id: PhaseId, color: impl Into<String>) -> Plan {
    let mut next = plan.clone();
    if let Some(phase) = next.phase_mut(phase_id) {
        phase.color = color.into();
    }
    next
}

/// Merges the set fields of `patch` into one task.
pub fn update_task(plan: &Plan, phase_id: PhaseId, task_id: TaskId, patch: &TaskPatch) -> Plan {
    let mut next = plan.clone();
    let Some(task) = next
        .phase_mut(phase_id)
        .and_then(|phase| phase.task_mut(task_id))
    else {
        return next;
    };
    if let Some(name) = &patch.name {
        task.name = name.clone();
    }
    if let Some(start_date) = patch.start_date {
        task.start_date = start_date;
    }
    if let Some(duration) = patch.duration {
        task.duration = duration;
    }
    next
}

/// Removes a phase together with all of its tasks.
pub fn remove_phase(plan: &Plan, phase_id: PhaseId) -> Plan {
    let mut next = plan.clone();
    next.phases.retain(|phase| phase.id != phase_id);
    next
}

pub fn remove_task(plan: &Plan, phase_id: PhaseId, task_id: TaskId) -> Plan {
    let mut next = plan.clone();
    if let Some(phase) = next.phase_mut(phase_id) {
        phase.tasks.retain(|task| task.id != task_id);
    }
    next
}
