//! Text timeline renderer.

use ganttline_core::{layout_plan, MonthWindow, Plan, Span};
use std::fmt::Write as _;

const LABEL_WIDTH: usize = 24;
const PHASE_FILL: char = '=';
const TASK_FILL: char = '#';
const EMPTY_FILL: char = '.';
/// Widest per-day column count the renderer draws.
pub const MAX_SCALE: usize = 16;

/// Renders month headers, one phase summary row and one row per task.
///
/// Bars are drawn on a grid of `total_days * scale` columns; anything
/// extending past the last column is cut at the grid edge. `scale` is
/// clamped to `1..=MAX_SCALE`.
pub fn render_timeline(window: &MonthWindow, plan: &Plan, scale: usize) -> String {
    let scale = scale.clamp(1, MAX_SCALE);
    let columns = (window.total_days() as usize).saturating_mul(scale);
    let mut out = String::new();

    let _ = write!(out, "{:<w$}", "", w = LABEL_WIDTH);
    for month in window {
        let width = (month.day_count as usize).saturating_mul(scale);
        let _ = write!(out, "|{:<w$}", month.label(), w = width.saturating_sub(1));
    }
    out.push('\n');

    for (phase, row) in plan.phases.iter().zip(layout_plan(window, plan)) {
        let label = format!("{} [{}]", phase.name, phase.color);
        let bar = row.span.map_or_else(
            || EMPTY_FILL.to_string().repeat(columns),
            |span| draw_bar(span, columns, PHASE_FILL),
        );
        let _ = writeln!(out, "{} {bar}", fit_label(&label));

        for (task, placed) in phase.tasks.iter().zip(row.tasks) {
            let duration = task
                .duration
                .map_or_else(|| "NaN".to_string(), |days| format!("{days}d"));
            let label = format!("  {} {} {}", task.name, task.start_date, duration);
            let _ = writeln!(
                out,
                "{} {}",
                fit_label(&label),
                draw_bar(placed.span, columns, TASK_FILL)
            );
        }
    }
    out
}

fn fit_label(label: &str) -> String {
    let width = LABEL_WIDTH - 1;
    if label.chars().count() > width {
        let mut cut = label.chars().take(width - 1).collect::<String>();
        cut.push('~');
        cut
    } else {
        format!("{label:<width$}")
    }
}

fn draw_bar(span: Span, columns: usize, fill: char) -> String {
    let mut cells = vec![EMPTY_FILL; columns];
    if span.is_visible() && columns > 0 {
        let start = (span.left / 100.0 * columns as f64).round() as usize;
        let len = ((span.width / 100.0 * columns as f64).round() as usize).max(1);
        for cell in cells.iter_mut().skip(start).take(len) {
            *cell = fill;
        }
    }
    cells.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::{draw_bar, fit_label, render_timeline, MAX_SCALE};
    use chrono::NaiveDate;
    use ganttline_core::{Month, MonthWindow, Phase, Plan, Span, Task};

    #[test]
    fn draw_bar_places_fill_by_percentages() {
        let bar = draw_bar(
            Span {
                left: 50.0,
                width: 25.0,
            },
            8,
            '#',
        );
        assert_eq!(bar, "....##..");
        assert_eq!(draw_bar(Span::HIDDEN, 4, '#'), "....");
    }

    #[test]
    fn draw_bar_cuts_overflow_at_grid_edge() {
        let bar = draw_bar(
            Span {
                left: 75.0,
                width: 50.0,
            },
            4,
            '#',
        );
        assert_eq!(bar, "...#");
    }

    #[test]
    fn long_labels_are_truncated() {
        let label = fit_label("a very long phase name that keeps going");
        assert_eq!(label.chars().count(), 23);
        assert!(label.ends_with('~'));
    }

    #[test]
    fn render_draws_headers_and_rows() {
        let window = MonthWindow::from_months(vec![Month::new(2025, 1).unwrap()]).unwrap();
        let mut phase = Phase::new("Build", "#FF6B6B");
        phase.tasks.push(Task::new(
            "api",
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            Some(7),
        ));
        let plan = Plan::from_phases(vec![phase]);

        let text = render_timeline(&window, &plan, 1);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Feb 2025"));
        assert!(lines[1].contains("=======....."));
        assert!(lines[2].contains("  api 2025-02-01 7d"));
        assert!(lines[2].ends_with(&format!("{}{}", "#".repeat(7), ".".repeat(21))));
    }

    #[test]
    fn extreme_scale_is_clamped() {
        let window = MonthWindow::from_months(vec![Month::new(2025, 1).unwrap()]).unwrap();
        let plan = Plan::from_phases(vec![Phase::new("Build", "#FF6B6B")]);

        let text = render_timeline(&window, &plan, usize::MAX);
        let row = text.lines().nth(1).unwrap();
        assert_eq!(row.chars().count(), 24 + 28 * MAX_SCALE);
    }
}
