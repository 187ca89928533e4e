//! Error types for strata-engine

use strata_core::CoreError;
use strata_db::DbError;
use thiserror::Error;

/// Migration engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Migration file failed to parse (R001)
    #[error("[R001] Failed to parse migration '{file}': {source}")]
    Parse {
        file: String,
        #[source]
        source: CoreError,
    },

    /// Core error outside a specific migration file (R002)
    #[error("[R002] {0}")]
    Core(#[from] CoreError),

    /// Database error (R003)
    #[error("[R003] {0}")]
    Db(#[from] DbError),

    /// Migrations directory could not be scanned (R004)
    #[error("[R004] Failed to scan migrations directory '{dir}': {message}")]
    Scan { dir: String, message: String },

    /// Forward apply failed; the version's transaction was rolled back (R005)
    #[error("[R005] Failed to apply version {id} ({file}): {source}")]
    Apply {
        id: i64,
        file: String,
        #[source]
        source: DbError,
    },

    /// Rollback step failed; the version's transaction was rolled back (R006)
    #[error("[R006] Failed to roll back version {id} ({file}): {source}")]
    RollbackStep {
        id: i64,
        file: String,
        #[source]
        source: DbError,
    },

    /// Same migration content recorded under two version ids (R007)
    #[error(
        "[R007] Version discrepancy for content hash {content_hash}: \
         ledger has {ledger_id}, filesystem has {file_id}"
    )]
    Discrepancy {
        content_hash: String,
        ledger_id: i64,
        file_id: i64,
    },

    /// Rollback target not present in the ledger (R008)
    #[error("[R008] Rollback target '{file}' not found in the ledger")]
    TargetNotFound { file: String },

    /// Parser task panicked or was aborted (R009)
    #[error("[R009] Migration parse task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Run cancelled before the next transaction boundary (R010)
    #[error("[R010] Migration run cancelled")]
    Cancelled,
}

/// Result type alias for EngineError
pub type EngineResult<T> = Result<T, EngineError>;
