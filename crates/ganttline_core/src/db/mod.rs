//! SQLite home of the plan snapshot.
//!
//! # Responsibility
//! - Open the snapshot database and bring its schema up to date.
//! - Report storage failures with the schema step they happened in.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A snapshot store written by a newer build is refused before any read
//!   or write touches it.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening, upgrading or querying the snapshot store.
#[derive(Debug)]
pub enum DbError {
    /// Plain SQLite failure outside of a schema upgrade.
    Storage(rusqlite::Error),
    /// Upgrading the store to `version` failed; the step was rolled back.
    Migration {
        version: u32,
        source: rusqlite::Error,
    },
    /// The store was written by a build with a newer schema.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "plan snapshot storage failed: {err}"),
            Self::Migration { version, source } => write!(
                f,
                "upgrading plan snapshot store to schema v{version} failed: {source}"
            ),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "plan snapshot store uses schema v{found} but this build reads up to v{supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Migration { source, .. } => Some(source),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn migration_error_names_the_failed_version() {
        let err = DbError::Migration {
            version: 1,
            source: rusqlite::Error::InvalidQuery,
        };
        assert!(err.to_string().contains("schema v1"));
        assert!(err.source().is_some());
    }
}
