//! Ordered schema steps for the snapshot store.
//!
//! # Invariants
//! - Step versions start at 1 and increase by one.
//! - Each step runs in its own transaction together with its
//!   `user_version` bump, so a failed step leaves the previous version.

use crate::db::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "kv_store",
    sql: include_str!("0001_kv_store.sql"),
}];

/// Newest schema version this build can read and write.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version recorded in the open database.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?)
}

/// Runs every step newer than the recorded version.
///
/// Fails with [`DbError::SchemaTooNew`] without touching the database when
/// it was written by a newer build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = schema_version(conn)?;
    let supported = latest_version();
    if found > supported {
        warn!(
            "event=db_migrate module=db status=rejected found_version={} supported_version={}",
            found, supported
        );
        return Err(DbError::SchemaTooNew { found, supported });
    }

    for migration in MIGRATIONS.iter().filter(|step| step.version > found) {
        apply_step(conn, migration)?;
    }
    Ok(())
}

fn apply_step(conn: &mut Connection, migration: &Migration) -> DbResult<()> {
    let failed = |source| DbError::Migration {
        version: migration.version,
        source,
    };
    let tx = conn.transaction().map_err(failed)?;
    tx.execute_batch(migration.sql).map_err(failed)?;
    tx.pragma_update(None, "user_version", migration.version)
        .map_err(failed)?;
    tx.commit().map_err(failed)?;
    info!(
        "event=db_migrate module=db status=ok version={} step={}",
        migration.version, migration.name
    );
    Ok(())
}
