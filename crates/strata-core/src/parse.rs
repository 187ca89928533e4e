//! Migration file parser.
//!
//! Separates a migration file into forward (up) statements and the
//! delimited rollback (down) block, while fingerprinting the raw byte
//! stream. The hash covers every byte of the file, so any textual
//! change — whitespace and comments included — produces a new
//! identity.

use crate::checksum::HashingReader;
use crate::error::CoreResult;
use crate::splitter::StatementSplitter;
use std::io::Read;

/// Opens the rollback block. Everything after the marker, and every
/// following statement, is a down statement until the block closes.
const ROLLBACK_MARKER: &str = "/* rollback";

/// Closes the rollback block; the closing statement itself is dropped.
const ROLLBACK_CLOSE: &str = "*/";

/// A parsed migration file, before the caller attaches its version id
/// and source file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMigration {
    /// Hex SHA-256 of the full raw file contents
    pub content_hash: String,
    /// Forward statements, in file order
    pub up: Vec<String>,
    /// Rollback statements, in file order (may be empty)
    pub down: Vec<String>,
}

/// Parse one migration file from `reader`.
pub fn parse_migration<R: Read>(reader: R) -> CoreResult<ParsedMigration> {
    let mut hashed = HashingReader::new(reader);
    let mut up = Vec::new();
    let mut down = Vec::new();
    let mut in_rollback = false;

    for token in StatementSplitter::new(&mut hashed) {
        let token = token?;
        let stmt = token.trim();
        if stmt.is_empty() {
            continue;
        }

        if in_rollback {
            if stmt.ends_with(ROLLBACK_CLOSE) {
                in_rollback = false;
            } else {
                down.push(stmt.to_string());
            }
            continue;
        }

        if let Some(idx) = stmt.find(ROLLBACK_MARKER) {
            in_rollback = true;
            let mut rest = stmt[idx + ROLLBACK_MARKER.len()..].trim();
            // marker and closer can share a statement
            if let Some(inner) = rest.strip_suffix(ROLLBACK_CLOSE) {
                in_rollback = false;
                rest = inner.trim_end();
            }
            if !rest.is_empty() {
                down.push(rest.to_string());
            }
            continue;
        }

        up.push(stmt.to_string());
    }

    Ok(ParsedMigration {
        content_hash: hashed.finalize(),
        up,
        down,
    })
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
