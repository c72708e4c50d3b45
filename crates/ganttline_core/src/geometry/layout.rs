//! Whole-plan layout pass.

use super::span::{phase_span, task_span, Span};
use crate::calendar::window::MonthWindow;
use crate::model::plan::{PhaseId, Plan, TaskId};

/// Placement of one task row.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskLayout {
    pub task_id: TaskId,
    pub span: Span,
}

/// Placement of one phase summary row and its task rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseLayout {
    pub phase_id: PhaseId,
    pub color: String,
    /// `None` when the phase has no placeable task.
    pub span: Option<Span>,
    pub tasks: Vec<TaskLayout>,
}

/// Runs the geometry mapper once per phase and once per task, in display
/// order.
pub fn layout_plan(window: &MonthWindow, plan: &Plan) -> Vec<PhaseLayout> {
    plan.phases
        .iter()
        .map(|phase| PhaseLayout {
            phase_id: phase.id,
            color: phase.color.clone(),
            span: phase_span(window, &phase.tasks),
            tasks: phase
                .tasks
                .iter()
                .map(|task| TaskLayout {
                    task_id: task.id,
                    span: task_span(window, task.start_date, task.duration),
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::layout_plan;
    use crate::calendar::window::{Month, MonthWindow};
    use crate::model::plan::{Phase, Plan, Task};
    use chrono::NaiveDate;

    #[test]
    fn layout_follows_display_order() {
        let window = MonthWindow::from_months(vec![Month::new(2025, 0).unwrap()]).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 1, 11).unwrap();

        let mut build = Phase::new("Build", "#FF6B6B");
        build.tasks.push(Task::new("a", start, Some(2)));
        build.tasks.push(Task::new("b", start, None));
        let empty = Phase::new("Later", "#4ECDC4");
        let plan = Plan::from_phases(vec![build.clone(), empty.clone()]);

        let rows = layout_plan(&window, &plan);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].phase_id, build.id);
        assert_eq!(rows[0].tasks.len(), 2);
        assert!(rows[0].tasks[0].span.is_visible());
        assert!(!rows[0].tasks[1].span.is_visible());
        assert!(rows[0].span.is_some());
        assert_eq!(rows[1].phase_id, empty.id);
        assert!(rows[1].span.is_none());
    }
}
