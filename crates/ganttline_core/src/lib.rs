//! Core domain logic for Ganttline.
//! This crate is the single source of truth for plan, calendar and geometry
//! invariants.

pub mod calendar;
pub mod clock;
pub mod db;
pub mod geometry;
pub mod layout;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod state;

pub use calendar::window::{generate_window, Month, MonthWindow};
pub use clock::{Clock, FixedClock, SystemClock};
pub use geometry::{day_offset, layout_plan, phase_span, task_span, PhaseLayout, Span, TaskLayout};
pub use layout::sidebar::SidebarResize;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::palette::{normalize_hex_color, palette_color, PALETTE};
pub use model::plan::{Phase, PhaseId, Plan, Task, TaskId};
pub use repo::plan_repo::{
    decode_plan, encode_plan, MemoryPlanRepository, PlanRepository, RepoError, RepoResult,
    SqlitePlanRepository, PLAN_STORAGE_KEY,
};
pub use service::plan_service::PlanService;
pub use state::transitions::{coerce_duration, TaskPatch};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
