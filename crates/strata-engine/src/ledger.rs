//! Ledger accessor.
//!
//! The ledger is the `<schema>.strata_versions` table inside the
//! target database: one row per applied migration, plus the permanent
//! `version_id = 0` sentinel inserted when the table is first
//! created. Rows are append-only on forward apply and individually
//! removed on rollback.

use crate::error::{EngineError, EngineResult};
use duckdb::Connection;
use strata_core::Version;
use strata_db::{DbError, TargetDb};

/// Ledger table name, qualified by the active schema at runtime.
pub const VERSION_TABLE: &str = "strata_versions";

/// Reads and writes the applied-version bookkeeping table.
pub struct Ledger {
    schema: String,
}

impl Ledger {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
        }
    }

    /// Schema-qualified table name.
    pub fn table_name(&self) -> String {
        format!("{}.{}", self.schema, VERSION_TABLE)
    }

    /// Idempotently create the ledger table.
    ///
    /// The sentinel row is inserted only when the table was actually
    /// absent, in the same transaction as the CREATE. Returns whether
    /// the table was created.
    pub fn ensure_table(&self, db: &TargetDb) -> EngineResult<bool> {
        if db.relation_exists(&self.schema, VERSION_TABLE)? {
            return Ok(false);
        }
        db.transaction::<_, _, EngineError>(|conn| {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS {} (
                     version_id   BIGINT NOT NULL,
                     source       VARCHAR NOT NULL,
                     content_hash VARCHAR NOT NULL,
                     created_at   TIMESTAMP NOT NULL DEFAULT now(),
                     PRIMARY KEY (version_id, content_hash)
                 )",
                self.table_name()
            ))
            .map_err(DbError::from)?;
            self.insert_version(conn, &sentinel())?;
            Ok(())
        })?;
        Ok(true)
    }

    /// All ledger rows, ordered by `version_id` descending.
    ///
    /// Callers depend on this order: the first row is the current
    /// version, and rollback walks the rows top-down. Reordering is a
    /// breaking change.
    pub fn list_versions(&self, db: &TargetDb) -> EngineResult<Vec<Version>> {
        db.with_conn(|conn| {
            let mut stmt = conn
                .prepare(&format!(
                    "SELECT version_id, source, content_hash FROM {} \
                     ORDER BY version_id DESC",
                    self.table_name()
                ))
                .map_err(DbError::from)?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Version {
                        id: row.get(0)?,
                        source: row.get(1)?,
                        content_hash: row.get(2)?,
                        up: Vec::new(),
                        down: Vec::new(),
                    })
                })
                .map_err(DbError::from)?;

            let mut versions = Vec::new();
            for row in rows {
                versions.push(row.map_err(DbError::from)?);
            }
            Ok(versions)
        })
    }

    /// The highest applied version (the sentinel, on a fresh ledger).
    pub fn current_version(&self, db: &TargetDb) -> EngineResult<Version> {
        db.with_conn(|conn| {
            conn.query_row(
                &format!(
                    "SELECT version_id, source, content_hash FROM {} \
                     ORDER BY version_id DESC LIMIT 1",
                    self.table_name()
                ),
                [],
                |row| {
                    Ok(Version {
                        id: row.get(0)?,
                        source: row.get(1)?,
                        content_hash: row.get(2)?,
                        up: Vec::new(),
                        down: Vec::new(),
                    })
                },
            )
            .map_err(DbError::from)
            .map_err(EngineError::from)
        })
    }

    /// Record an applied version inside a caller-supplied transaction.
    pub fn insert_version(&self, conn: &Connection, ver: &Version) -> EngineResult<()> {
        conn.execute(
            &format!(
                "INSERT INTO {} (version_id, source, content_hash) VALUES (?, ?, ?)",
                self.table_name()
            ),
            duckdb::params![ver.id, ver.source, ver.content_hash],
        )
        .map_err(DbError::from)?;
        Ok(())
    }

    /// Remove a version's row inside a caller-supplied transaction.
    pub fn delete_version(&self, conn: &Connection, ver: &Version) -> EngineResult<()> {
        conn.execute(
            &format!(
                "DELETE FROM {} WHERE version_id = ? AND content_hash = ?",
                self.table_name()
            ),
            duckdb::params![ver.id, ver.content_hash],
        )
        .map_err(DbError::from)?;
        Ok(())
    }
}

/// The permanent bootstrap row marking ledger initialization.
fn sentinel() -> Version {
    Version {
        id: 0,
        content_hash: String::new(),
        source: String::new(),
        up: Vec::new(),
        down: Vec::new(),
    }
}

#[cfg(test)]
#[path = "ledger_test.rs"]
mod tests;
