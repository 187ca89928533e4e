//! Migration runner.
//!
//! Orchestrates one engine invocation: discover and parse migration
//! files concurrently, reconcile them against the ledger, then apply
//! or roll back one version per transaction in strict version order.

use crate::cancel::CancelFlag;
use crate::error::{EngineError, EngineResult};
use crate::ledger::Ledger;
use serde::Serialize;
use std::collections::HashMap;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use strata_core::{parse_migration, reconcile, version_from_filename, CoreError, Version};
use strata_db::{DbError, TargetDb};
use tokio::sync::Semaphore;

/// Cap on concurrently parsed migration files, to keep large
/// migration sets from exhausting file descriptors.
const PARSE_CONCURRENCY: usize = 64;

/// Reconciliation view for the status command.
#[derive(Debug, Serialize)]
pub struct Status {
    /// Highest applied version id
    pub current: i64,
    /// Ledger rows, descending
    pub applied: Vec<Version>,
    /// Discovered versions waiting to be applied, ascending
    pub pending: Vec<Version>,
    /// Unapplied versions below the high-water mark, ascending
    pub missing: Vec<Version>,
}

/// One engine invocation against one database and one migrations
/// directory.
///
/// A single runner instance is assumed to be the only engine working
/// against its schema; concurrent external invocations are the
/// caller's responsibility to coordinate.
pub struct Runner {
    db: Arc<TargetDb>,
    dir: PathBuf,
    schema: OnceLock<String>,
    cancel: CancelFlag,
}

impl Runner {
    pub fn new(db: Arc<TargetDb>, dir: impl Into<PathBuf>) -> Self {
        Self {
            db,
            dir: dir.into(),
            schema: OnceLock::new(),
            cancel: CancelFlag::new(),
        }
    }

    /// Handle for wiring external cancellation (ctrl-c) to this run.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Active schema name, looked up once per runner instance.
    fn schema(&self) -> EngineResult<&str> {
        if let Some(schema) = self.schema.get() {
            return Ok(schema);
        }
        let schema = self.db.current_schema()?;
        Ok(self.schema.get_or_init(|| schema))
    }

    fn ledger(&self) -> EngineResult<Ledger> {
        Ok(Ledger::new(self.schema()?))
    }

    /// Discover `*.sql` files directly under the migrations root and
    /// parse them concurrently.
    ///
    /// Fails fast: the first parse error aborts the collection and
    /// outstanding work is abandoned; no partial set is returned.
    pub async fn collect_migrations(&self) -> EngineResult<Vec<Version>> {
        let pattern = self.dir.join("*.sql").to_string_lossy().into_owned();
        let entries = glob::glob(&pattern).map_err(|e| EngineError::Scan {
            dir: self.dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| EngineError::Scan {
                dir: self.dir.display().to_string(),
                message: e.to_string(),
            })?;
            if path.is_file() {
                files.push(path);
            }
        }

        let semaphore = Arc::new(Semaphore::new(PARSE_CONCURRENCY));
        let mut handles = Vec::with_capacity(files.len());
        for path in files {
            let semaphore = Arc::clone(&semaphore);
            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire().await {
                    Ok(permit) => permit,
                    // Semaphore was closed -- treat as cancellation
                    Err(_) => return Err(EngineError::Cancelled),
                };
                parse_file(&path)
            }));
        }

        let mut versions = Vec::with_capacity(handles.len());
        for handle in handles {
            versions.push(handle.await??);
        }
        Ok(versions)
    }

    /// Apply every unapplied migration in ascending version order.
    ///
    /// Returns the final applied version id: the last committed
    /// version, or the ledger's current maximum when nothing was
    /// pending.
    pub async fn migrate(&self) -> EngineResult<i64> {
        let discovered = self.collect_migrations().await?;

        let ledger = self.ledger()?;
        if ledger.ensure_table(&self.db)? {
            log::debug!("created ledger table {}", ledger.table_name());
        }

        let applied = ledger.list_versions(&self.db)?;
        let rec = reconcile(&applied, discovered);
        for missing in &rec.missing {
            log::warn!(
                "version {} ({}) was added below the current version and will not be applied",
                missing.id,
                missing.source
            );
        }

        let mut current = applied.first().map(|v| v.id).unwrap_or(0);
        if rec.unapplied.is_empty() {
            log::info!("no migrations to run; current version: {current}");
            return Ok(current);
        }

        for ver in &rec.unapplied {
            if self.cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            self.run_up(&ledger, ver)?;
            log::info!("applied version {} ({})", ver.id, ver.source);
            current = ver.id;
        }
        Ok(current)
    }

    /// Roll back down to, and including, the version whose source file
    /// name is `target_file`. Returns the resulting version id.
    pub async fn rollback(&self, target_file: &str) -> EngineResult<i64> {
        let discovered = self.collect_migrations().await?;
        let by_hash: HashMap<String, Version> = discovered
            .into_iter()
            .map(|v| (v.content_hash.clone(), v))
            .collect();

        let ledger = self.ledger()?;
        ledger.ensure_table(&self.db)?;
        let applied = ledger.list_versions(&self.db)?;

        let target_id = applied
            .iter()
            .find(|v| v.source == target_file)
            .map(|v| v.id)
            .ok_or_else(|| EngineError::TargetNotFound {
                file: target_file.to_string(),
            })?;

        for row in &applied {
            if row.id == 0 || row.id < target_id {
                break;
            }
            let Some(file_ver) = by_hash.get(&row.content_hash) else {
                log::warn!(
                    "applied version {} ({}) has no matching file on disk; skipping",
                    row.id,
                    row.source
                );
                continue;
            };
            if file_ver.id != row.id {
                return Err(EngineError::Discrepancy {
                    content_hash: row.content_hash.clone(),
                    ledger_id: row.id,
                    file_id: file_ver.id,
                });
            }
            if self.cancel.is_cancelled() {
                return Err(EngineError::Cancelled);
            }
            self.run_down(&ledger, file_ver)?;
            log::info!("rolled back version {} ({})", row.id, row.source);
        }
        Ok(target_id - 1)
    }

    /// Reconciliation view without mutating anything beyond ensuring
    /// the ledger table exists.
    pub async fn status(&self) -> EngineResult<Status> {
        let discovered = self.collect_migrations().await?;

        let ledger = self.ledger()?;
        ledger.ensure_table(&self.db)?;
        let applied = ledger.list_versions(&self.db)?;
        let current = applied.first().map(|v| v.id).unwrap_or(0);
        let rec = reconcile(&applied, discovered);

        Ok(Status {
            current,
            applied,
            pending: rec.unapplied,
            missing: rec.missing,
        })
    }

    /// One version forward: all up statements plus the ledger insert
    /// in a single transaction.
    fn run_up(&self, ledger: &Ledger, ver: &Version) -> EngineResult<()> {
        self.db
            .transaction::<_, _, EngineError>(|conn| {
                for stmt in &ver.up {
                    conn.execute_batch(stmt).map_err(DbError::from)?;
                }
                ledger.insert_version(conn, ver)?;
                Ok(())
            })
            .map_err(|e| match e {
                EngineError::Db(source) => EngineError::Apply {
                    id: ver.id,
                    file: ver.source.clone(),
                    source,
                },
                other => other,
            })
    }

    /// One version backward: all down statements (possibly none) plus
    /// the ledger delete in a single transaction.
    fn run_down(&self, ledger: &Ledger, ver: &Version) -> EngineResult<()> {
        self.db
            .transaction::<_, _, EngineError>(|conn| {
                for stmt in &ver.down {
                    conn.execute_batch(stmt).map_err(DbError::from)?;
                }
                ledger.delete_version(conn, ver)?;
                Ok(())
            })
            .map_err(|e| match e {
                EngineError::Db(source) => EngineError::RollbackStep {
                    id: ver.id,
                    file: ver.source.clone(),
                    source,
                },
                other => other,
            })
    }
}

/// Parse one migration file into a [`Version`].
fn parse_file(path: &Path) -> EngineResult<Version> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default()
        .to_string();
    let id = version_from_filename(&name).map_err(|e| EngineError::Parse {
        file: name.clone(),
        source: e,
    })?;
    let file = std::fs::File::open(path).map_err(|e| {
        EngineError::Core(CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })
    })?;
    let parsed = parse_migration(BufReader::new(file)).map_err(|e| EngineError::Parse {
        file: name.clone(),
        source: e,
    })?;
    Ok(Version {
        id,
        content_hash: parsed.content_hash,
        source: name,
        up: parsed.up,
        down: parsed.down,
    })
}
