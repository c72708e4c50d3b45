//! Plan snapshot repository contract and implementations.
//!
//! # Responsibility
//! - Serialize the plan as one JSON value under a fixed storage key.
//! - Degrade unreadable snapshots to an empty plan.
//!
//! # Invariants
//! - The storage key is [`PLAN_STORAGE_KEY`] for every backend.
//! - `encode_plan` followed by `decode_plan` reproduces the same tree.
//! - Decoding is all-or-nothing: one bad field (e.g. a negative duration)
//!   loads an empty plan, and the next save overwrites the stored snapshot.

use crate::db::DbError;
use crate::model::plan::Plan;
use log::{debug, info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key under which the serialized plan is stored.
pub const PLAN_STORAGE_KEY: &str = "ganttData";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error raised while writing a plan snapshot.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Encode(serde_json::Error),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode plan snapshot: {err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Storage(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}

/// Storage port for whole-plan snapshots.
pub trait PlanRepository {
    /// Returns the stored plan, or an empty plan when none is readable.
    fn load_plan(&self) -> Plan;
    /// Replaces the stored snapshot with `plan`.
    fn save_plan(&self, plan: &Plan) -> RepoResult<()>;
}

/// Serializes a plan into its persisted JSON form.
pub fn encode_plan(plan: &Plan) -> RepoResult<String> {
    Ok(serde_json::to_string(plan)?)
}

/// Parses a persisted JSON snapshot.
pub fn decode_plan(raw: &str) -> Result<Plan, serde_json::Error> {
    serde_json::from_str(raw)
}

fn plan_from_snapshot(raw: Option<String>, backend: &str) -> Plan {
    let Some(raw) = raw else {
        debug!("event=plan_load module=repo status=empty backend={backend}");
        return Plan::new();
    };
    match decode_plan(&raw) {
        Ok(plan) => {
            debug!(
                "event=plan_load module=repo status=ok backend={} phases={} tasks={}",
                backend,
                plan.len(),
                plan.task_count()
            );
            plan
        }
        Err(err) => {
            warn!(
                "event=plan_load module=repo status=degraded backend={} error_code=snapshot_malformed error={}",
                backend, err
            );
            Plan::new()
        }
    }
}

/// SQLite-backed snapshot store over the `kv_store` table.
pub struct SqlitePlanRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePlanRepository<'conn> {
    /// Wraps a connection returned by [`crate::db::open_db`].
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn read_raw(&self) -> RepoResult<Option<String>> {
        let raw = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                params![PLAN_STORAGE_KEY],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(raw)
    }
}

impl PlanRepository for SqlitePlanRepository<'_> {
    fn load_plan(&self) -> Plan {
        match self.read_raw() {
            Ok(raw) => plan_from_snapshot(raw, "sqlite"),
            Err(err) => {
                warn!(
                    "event=plan_load module=repo status=degraded backend=sqlite error_code=snapshot_read_failed error={}",
                    err
                );
                Plan::new()
            }
        }
    }

    fn save_plan(&self, plan: &Plan) -> RepoResult<()> {
        let encoded = encode_plan(plan)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![PLAN_STORAGE_KEY, encoded],
        )?;
        info!(
            "event=plan_save module=repo status=ok backend=sqlite phases={} tasks={} bytes={}",
            plan.len(),
            plan.task_count(),
            encoded.len()
        );
        Ok(())
    }
}

/// In-process snapshot slot holding the raw serialized text.
#[derive(Debug, Default)]
pub struct MemoryPlanRepository {
    slot: RefCell<Option<String>>,
}

impl MemoryPlanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with arbitrary text, valid or not.
    pub fn with_raw_snapshot(raw: impl Into<String>) -> Self {
        Self {
            slot: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns the raw text currently stored.
    pub fn raw_snapshot(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl PlanRepository for MemoryPlanRepository {
    fn load_plan(&self) -> Plan {
        plan_from_snapshot(self.raw_snapshot(), "memory")
    }

    fn save_plan(&self, plan: &Plan) -> RepoResult<()> {
        let encoded = encode_plan(plan)?;
        *self.slot.borrow_mut() = Some(encoded);
        Ok(())
    }
}

impl<R: PlanRepository + ?Sized> PlanRepository for &R {
    fn load_plan(&self) -> Plan {
        (**self).load_plan()
    }

    fn save_plan(&self, plan: &Plan) -> RepoResult<()> {
        (**self).save_plan(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_plan, encode_plan, MemoryPlanRepository, PlanRepository};
    use crate::model::plan::{Phase, Plan, Task};
    use chrono::NaiveDate;

    #[test]
    fn memory_repository_round_trips_plan() {
        let mut phase = Phase::new("Build", "#FF6B6B");
        phase.tasks.push(Task::new(
            "api",
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Some(5),
        ));
        let plan = Plan::from_phases(vec![phase]);

        let repo = MemoryPlanRepository::new();
        repo.save_plan(&plan).unwrap();
        assert_eq!(repo.load_plan(), plan);
    }

    #[test]
    fn malformed_snapshot_loads_as_empty_plan() {
        let repo = MemoryPlanRepository::with_raw_snapshot("{not json");
        assert!(repo.load_plan().is_empty());

        let wrong_shape = MemoryPlanRepository::with_raw_snapshot(r#"{"phases": 3}"#);
        assert!(wrong_shape.load_plan().is_empty());
    }

    #[test]
    fn one_bad_task_field_discards_the_whole_snapshot() {
        let raw = r##"[
            {"id": "6f1c2a5e-8d0b-4c7e-9a51-0d2f3b4c5d6e", "name": "Kept", "color": "#FF6B6B", "tasks": []},
            {"id": "7a2d3b6f-9e1c-4d8f-8b62-1e3a4c5d6e7f", "name": "Bad", "color": "#4ECDC4", "tasks": [
                {"id": "8b3e4c7a-0f2d-4e9a-9c73-2f4b5d6e7f80", "name": "t", "startDate": "2025-03-01", "duration": -3}
            ]}
        ]"##;
        let repo = MemoryPlanRepository::with_raw_snapshot(raw);
        assert!(repo.load_plan().is_empty());
        assert_eq!(repo.raw_snapshot().as_deref(), Some(raw));
    }

    #[test]
    fn missing_snapshot_loads_as_empty_plan() {
        assert!(MemoryPlanRepository::new().load_plan().is_empty());
    }

    #[test]
    fn encoded_plan_is_a_bare_array() {
        let encoded = encode_plan(&Plan::new()).unwrap();
        assert_eq!(encoded, "[]");
        assert_eq!(decode_plan("[]").unwrap(), Plan::new());
    }
}
