//! Migration version identity.
//!
//! A migration's version number is the run of decimal digits at the
//! front of its file name (`005_add_sessions.sql` → 5). It is parsed
//! and validated exactly once, here, and carried as a typed integer
//! from then on.

use crate::error::{CoreError, CoreResult};
use serde::Serialize;

/// One migration unit: a numeric id, a content fingerprint, the
/// originating file name, and the forward/reverse statement lists.
///
/// Rows read back from the ledger reuse this type with empty
/// statement lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    /// Version number from the file name prefix; 0 only for the
    /// ledger's bootstrap sentinel
    pub id: i64,
    /// Hex SHA-256 of the raw file contents
    pub content_hash: String,
    /// Originating file name, verbatim
    pub source: String,
    /// Forward statements
    #[serde(skip)]
    pub up: Vec<String>,
    /// Rollback statements
    #[serde(skip)]
    pub down: Vec<String>,
}

/// Extract the version number from a migration file name.
pub fn version_from_filename(name: &str) -> CoreResult<i64> {
    let digits_end = name
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(name.len());
    if digits_end == 0 {
        return Err(CoreError::MissingVersionPrefix {
            file: name.to_string(),
        });
    }
    let id: i64 = name[..digits_end]
        .parse()
        .map_err(|_| CoreError::VersionOutOfRange {
            file: name.to_string(),
        })?;
    if id == 0 {
        return Err(CoreError::VersionZero {
            file: name.to_string(),
        });
    }
    Ok(id)
}

#[cfg(test)]
#[path = "version_test.rs"]
mod tests;
