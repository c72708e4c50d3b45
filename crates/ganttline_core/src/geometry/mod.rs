//! Calendar-to-percentage geometry.
//!
//! # Responsibility
//! - Place task and phase bars as `[left%, width%]` spans of the window.
//! - Compose whole-plan layouts for views.
//!
//! # Invariants
//! - Every placement divides by the same `MonthWindow::total_days()`.
//! - Day offsets count visible days only; all day math is integral.
//! - Single-task widths are never capped; phase spans are capped at 100%.

mod layout;
mod span;

pub use layout::{layout_plan, PhaseLayout, TaskLayout};
pub use span::{day_offset, phase_span, task_span, Span};
