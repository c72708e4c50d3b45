//! FFI use-case API for the native timeline shell.
//!
//! # Responsibility
//! - Expose calendar, geometry and plan editing use cases via FRB.
//! - Convert every failure into a message; the shell never sees a panic.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Each mutating call loads the stored plan, applies one edit and saves.
//! - Ids cross the boundary as UUID strings; dates as `YYYY-MM-DD`.

use chrono::NaiveDate;
use ganttline_core::db::open_db;
use ganttline_core::layout::month_min_width_px;
use ganttline_core::{
    core_version as core_version_inner, generate_window, init_logging as init_logging_inner,
    layout_plan, normalize_hex_color, ping as ping_inner, Month, MonthWindow, PlanService,
    RepoResult, SidebarResize, Span, SqlitePlanRepository, SystemClock, TaskPatch,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "ganttline.sqlite3";
const DB_PATH_ENV: &str = "GANTTLINE_DB_PATH";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes the core crate version.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns an empty string on success and an error message on failure.
/// Repeating the same `level + log_dir` is accepted; any other combination
/// after the first success is rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Pins the plan database location for this process.
///
/// Must run before the first plan call to take effect. Returns an empty
/// string on success, or an error message when the path is blank or a
/// different path is already active.
#[flutter_rust_bridge::frb(sync)]
pub fn configure_db_path(path: String) -> String {
    let trimmed = path.trim();
    if trimmed.is_empty() {
        return "db path cannot be empty".to_string();
    }
    let requested = PathBuf::from(trimmed);
    let active = DB_PATH.get_or_init(|| requested.clone());
    if *active != requested {
        return format!(
            "db path already set to `{}`; refusing to switch to `{}`",
            active.display(),
            requested.display()
        );
    }
    info!(
        "event=ffi_configure module=ffi status=ok db_path={}",
        active.display()
    );
    String::new()
}

/// Visible month identity passed back and forth with the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRef {
    pub year: i32,
    /// Zero-based month (`0` = January).
    pub month_index: u32,
}

/// Month header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthItem {
    pub year: i32,
    pub month_index: u32,
    pub day_count: u32,
    /// Header label such as `Mar 2025`.
    pub label: String,
    pub min_width_px: u32,
}

/// Task row: editable fields plus the placed bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub task_id: String,
    pub name: String,
    pub start_date: String,
    /// `None` when the last duration edit was not a number.
    pub duration: Option<u32>,
    pub left: String,
    pub width: String,
}

/// Phase row: header fields, optional summary bar and task rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseItem {
    pub phase_id: String,
    pub name: String,
    pub color: String,
    /// `None` when the phase has no placeable task.
    pub left: Option<String>,
    pub width: Option<String>,
    pub tasks: Vec<TaskItem>,
}

/// Everything one render pass needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineView {
    pub ok: bool,
    pub months: Vec<MonthItem>,
    pub total_days: u32,
    pub phases: Vec<PhaseItem>,
    pub message: String,
}

/// Generic action response envelope for plan edits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanActionResponse {
    pub ok: bool,
    /// Id of the created phase/task, when the call creates one.
    pub id: Option<String>,
    pub message: String,
}

impl PlanActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Builds a window of `count` months starting at the current month.
#[flutter_rust_bridge::frb(sync)]
pub fn window_generate(count: u32) -> Vec<MonthItem> {
    let window = generate_window(&SystemClock, count as usize);
    window.iter().map(to_month_item).collect()
}

/// Inserts the month following `months[index]`; unchanged when already
/// visible or `index` does not name a valid entry.
///
/// `index` addresses the caller's list; the returned window is sorted and
/// free of duplicates.
#[flutter_rust_bridge::frb(sync)]
pub fn window_extend_after(months: Vec<MonthRef>, index: u32) -> Vec<MonthItem> {
    let mut window = resolve_window(&months);
    if let Some(position) = resolve_index(&months, index, &window) {
        window.extend_after(position);
    }
    window.iter().map(to_month_item).collect()
}

/// Removes `months[index]`; unchanged when it is the last month or `index`
/// does not name a valid entry.
#[flutter_rust_bridge::frb(sync)]
pub fn window_remove(months: Vec<MonthRef>, index: u32) -> Vec<MonthItem> {
    let mut window = resolve_window(&months);
    if let Some(position) = resolve_index(&months, index, &window) {
        window.remove(position);
    }
    window.iter().map(to_month_item).collect()
}

/// Loads the stored plan and places every bar against `months`.
///
/// An empty or unusable `months` list falls back to the current month.
#[flutter_rust_bridge::frb(sync)]
pub fn timeline_view(months: Vec<MonthRef>) -> TimelineView {
    let window = resolve_window(&months);
    let db_path = resolve_db_path();
    let conn = match open_db(&db_path) {
        Ok(conn) => conn,
        Err(err) => {
            return TimelineView {
                ok: false,
                months: window.iter().map(to_month_item).collect(),
                total_days: window.total_days(),
                phases: Vec::new(),
                message: format!("timeline_view failed: {err}"),
            };
        }
    };
    let service = PlanService::new(SqlitePlanRepository::new(&conn), SystemClock);
    let plan = service.plan();
    let rows = layout_plan(&window, plan);

    let phases = plan
        .phases
        .iter()
        .zip(rows)
        .map(|(phase, row)| PhaseItem {
            phase_id: phase.id.to_string(),
            name: phase.name.clone(),
            color: phase.color.clone(),
            left: row.span.map(|span| span.left_css()),
            width: row.span.map(|span| span.width_css()),
            tasks: phase
                .tasks
                .iter()
                .zip(row.tasks)
                .map(|(task, placed)| to_task_item(task, placed.span))
                .collect(),
        })
        .collect::<Vec<_>>();

    TimelineView {
        ok: true,
        months: window.iter().map(to_month_item).collect(),
        total_days: window.total_days(),
        message: format!("{} phase(s).", phases.len()),
        phases,
    }
}

/// Appends a default phase.
#[flutter_rust_bridge::frb(sync)]
pub fn add_phase() -> PlanActionResponse {
    match with_plan_service(|service| service.add_phase()) {
        Ok(phase_id) => PlanActionResponse::success("Phase added.", Some(phase_id.to_string())),
        Err(err) => PlanActionResponse::failure(format!("add_phase failed: {err}")),
    }
}

/// Appends a default task starting today. Unknown phases are a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn add_task(phase_id: String) -> PlanActionResponse {
    let phase_id = match parse_id("phase_id", &phase_id) {
        Ok(id) => id,
        Err(message) => return PlanActionResponse::failure(message),
    };
    match with_plan_service(|service| service.add_task(phase_id)) {
        Ok(Some(task_id)) => PlanActionResponse::success("Task added.", Some(task_id.to_string())),
        Ok(None) => PlanActionResponse::success("No matching phase.", None),
        Err(err) => PlanActionResponse::failure(format!("add_task failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn rename_phase(phase_id: String, name: String) -> PlanActionResponse {
    let phase_id = match parse_id("phase_id", &phase_id) {
        Ok(id) => id,
        Err(message) => return PlanActionResponse::failure(message),
    };
    match with_plan_service(|service| service.rename_phase(phase_id, name)) {
        Ok(()) => PlanActionResponse::success("Phase renamed.", None),
        Err(err) => PlanActionResponse::failure(format!("rename_phase failed: {err}")),
    }
}

/// Sets a phase color from a palette swatch or custom `#RGB`/`#RRGGBB`
/// input.
#[flutter_rust_bridge::frb(sync)]
pub fn recolor_phase(phase_id: String, color: String) -> PlanActionResponse {
    let phase_id = match parse_id("phase_id", &phase_id) {
        Ok(id) => id,
        Err(message) => return PlanActionResponse::failure(message),
    };
    let Some(color) = normalize_hex_color(&color) else {
        warn!("event=ffi_recolor module=ffi status=rejected error_code=invalid_color");
        return PlanActionResponse::failure(format!("invalid color `{}`", color.trim()));
    };
    match with_plan_service(|service| service.recolor_phase(phase_id, color)) {
        Ok(()) => PlanActionResponse::success("Phase recolored.", None),
        Err(err) => PlanActionResponse::failure(format!("recolor_phase failed: {err}")),
    }
}

/// Merges edited task fields. `duration_text` is raw field input and is
/// coerced; text that is not a number is stored as-is (zero-width bar).
#[flutter_rust_bridge::frb(sync)]
pub fn update_task(
    phase_id: String,
    task_id: String,
    name: Option<String>,
    start_date: Option<String>,
    duration_text: Option<String>,
) -> PlanActionResponse {
    let ids = parse_id("phase_id", &phase_id)
        .and_then(|phase_id| parse_id("task_id", &task_id).map(|task_id| (phase_id, task_id)));
    let (phase_id, task_id) = match ids {
        Ok(ids) => ids,
        Err(message) => return PlanActionResponse::failure(message),
    };

    let mut patch = TaskPatch::default();
    if let Some(name) = name {
        patch = patch.with_name(name);
    }
    if let Some(raw) = start_date {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => patch = patch.with_start_date(date),
            Err(err) => {
                return PlanActionResponse::failure(format!("invalid start_date `{raw}`: {err}"))
            }
        }
    }
    if let Some(raw) = duration_text {
        patch = patch.with_duration_text(&raw);
    }

    match with_plan_service(|service| service.update_task(phase_id, task_id, &patch)) {
        Ok(()) => PlanActionResponse::success("Task updated.", None),
        Err(err) => PlanActionResponse::failure(format!("update_task failed: {err}")),
    }
}

/// Removes a phase and its tasks. The shell confirms with the user first.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_phase(phase_id: String) -> PlanActionResponse {
    let phase_id = match parse_id("phase_id", &phase_id) {
        Ok(id) => id,
        Err(message) => return PlanActionResponse::failure(message),
    };
    match with_plan_service(|service| service.remove_phase(phase_id)) {
        Ok(()) => PlanActionResponse::success("Phase removed.", None),
        Err(err) => PlanActionResponse::failure(format!("remove_phase failed: {err}")),
    }
}

/// Removes one task. The shell confirms with the user first.
#[flutter_rust_bridge::frb(sync)]
pub fn remove_task(phase_id: String, task_id: String) -> PlanActionResponse {
    let ids = parse_id("phase_id", &phase_id)
        .and_then(|phase_id| parse_id("task_id", &task_id).map(|task_id| (phase_id, task_id)));
    let (phase_id, task_id) = match ids {
        Ok(ids) => ids,
        Err(message) => return PlanActionResponse::failure(message),
    };
    match with_plan_service(|service| service.remove_task(phase_id, task_id)) {
        Ok(()) => PlanActionResponse::success("Task removed.", None),
        Err(err) => PlanActionResponse::failure(format!("remove_task failed: {err}")),
    }
}

/// Sidebar width for a pointer position during a resize drag, as a CSS
/// percentage clamped to the allowed range.
#[flutter_rust_bridge::frb(sync)]
pub fn sidebar_drag_width(pointer_x: f64, container_left: f64, container_width: f64) -> String {
    let mut sidebar = SidebarResize::default();
    sidebar.begin_drag();
    sidebar.drag_to(pointer_x, container_left, container_width);
    sidebar.width_css()
}

fn parse_id(field: &str, raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid {field} `{raw}`: {err}"))
}

fn resolve_window(months: &[MonthRef]) -> MonthWindow {
    let parsed = months
        .iter()
        .filter_map(|month| Month::new(month.year, month.month_index))
        .collect::<Vec<_>>();
    MonthWindow::from_months(parsed).unwrap_or_else(|| generate_window(&SystemClock, 1))
}

/// Position of the caller's `months[index]` inside the normalized window.
fn resolve_index(months: &[MonthRef], index: u32, window: &MonthWindow) -> Option<usize> {
    let entry = months.get(usize::try_from(index).ok()?)?;
    let month = Month::new(entry.year, entry.month_index)?;
    window.position_of(month.start_date)
}

fn to_month_item(month: &Month) -> MonthItem {
    MonthItem {
        year: month.year,
        month_index: month.month_index,
        day_count: month.day_count,
        label: month.label(),
        min_width_px: month_min_width_px(month),
    }
}

fn to_task_item(task: &ganttline_core::Task, span: Span) -> TaskItem {
    TaskItem {
        task_id: task.id.to_string(),
        name: task.name.clone(),
        start_date: task.start_date.format("%Y-%m-%d").to_string(),
        duration: task.duration,
        left: span.left_css(),
        width: span.width_css(),
    }
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_plan_service<T>(
    f: impl FnOnce(&mut PlanService<SqlitePlanRepository<'_>, SystemClock>) -> RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("plan DB open failed: {err}"))?;
    let mut service = PlanService::new(SqlitePlanRepository::new(&conn), SystemClock);
    f(&mut service).map_err(|err| err.to_string())
}
