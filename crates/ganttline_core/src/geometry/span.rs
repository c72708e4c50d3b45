//! Span computation for single tasks and phase aggregates.

use crate::calendar::window::MonthWindow;
use crate::model::plan::Task;
use chrono::NaiveDate;

/// Horizontal placement of a bar, in percent of the window's total days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f64,
    pub width: f64,
}

impl Span {
    /// Placement used for bars that are not positioned at all.
    pub const HIDDEN: Span = Span {
        left: 0.0,
        width: 0.0,
    };

    /// A zero-width span renders nothing.
    pub fn is_visible(&self) -> bool {
        self.width > 0.0
    }

    /// Right edge in percent. May exceed 100 for single tasks.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// CSS-style left offset, e.g. `57.377049180327866%`.
    pub fn left_css(&self) -> String {
        format!("{}%", self.left)
    }

    /// CSS-style width, e.g. `16.39344262295082%`.
    pub fn width_css(&self) -> String {
        format!("{}%", self.width)
    }
}

fn percent_of(days: f64, total_days: u32) -> f64 {
    if total_days == 0 {
        return 0.0;
    }
    days / f64::from(total_days) * 100.0
}

/// Number of visible days that lie strictly before `date`.
///
/// Dates before the window give `0`; dates after it give `total_days`.
/// Months missing from the window contribute nothing.
pub fn day_offset(window: &MonthWindow, date: NaiveDate) -> u32 {
    window
        .iter()
        .map(|month| {
            let elapsed = date.signed_duration_since(month.start_date).num_days();
            let clamped = elapsed.clamp(0, i64::from(month.day_count));
            // clamped lies in 0..=31
            clamped as u32
        })
        .sum()
}

/// Places one task bar.
///
/// A start date outside every visible month yields [`Span::HIDDEN`]; the bar
/// is not clipped to the window edge. A `None` duration yields zero width.
/// The width is not capped, so a late task may extend past 100%.
pub fn task_span(window: &MonthWindow, start_date: NaiveDate, duration: Option<u32>) -> Span {
    if !window.contains_date(start_date) {
        return Span::HIDDEN;
    }
    let total_days = window.total_days();
    let offset = day_offset(window, start_date);
    Span {
        left: percent_of(f64::from(offset), total_days).max(0.0),
        width: duration.map_or(0.0, |days| percent_of(f64::from(days), total_days)),
    }
}

/// Places the aggregate bar of a phase covering `[earliest start, latest end)`.
///
/// Returns `None` when no task has a usable duration. Tasks whose duration is
/// not a number are left out of the aggregate.
pub fn phase_span(window: &MonthWindow, tasks: &[Task]) -> Option<Span> {
    let mut bounds: Option<(NaiveDate, NaiveDate)> = None;
    for task in tasks {
        let Some(end) = task.end_date() else {
            continue;
        };
        bounds = Some(match bounds {
            None => (task.start_date, end),
            Some((earliest, latest)) => (earliest.min(task.start_date), latest.max(end)),
        });
    }
    let (earliest_start, latest_end) = bounds?;

    let total_days = window.total_days();
    let span_days = latest_end.signed_duration_since(earliest_start).num_days();
    let left = percent_of(f64::from(day_offset(window, earliest_start)), total_days).max(0.0);
    let width = percent_of(span_days as f64, total_days).min((100.0 - left).max(0.0));
    Some(Span { left, width })
}
