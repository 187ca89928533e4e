//! Reconciliation of filesystem migrations against the applied ledger.

use crate::version::Version;
use std::collections::HashMap;

/// Outcome of comparing discovered migrations with the ledger.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Versions to apply, ascending by id
    pub unapplied: Vec<Version>,
    /// Unapplied versions sitting below the ledger's high-water mark,
    /// ascending by id. Warned about and never applied.
    pub missing: Vec<Version>,
}

impl Reconciliation {
    pub fn has_missing(&self) -> bool {
        !self.missing.is_empty()
    }
}

/// Decide what must be applied.
///
/// A discovered version whose content hash is already in the ledger is
/// skipped, which is what makes re-running the engine against an
/// unchanged directory a no-op. An unapplied version numbered below
/// the highest applied id is reported as missing rather than applied:
/// the engine never reaches back below the high-water mark to reorder
/// schema evolution that has already happened.
pub fn reconcile(applied: &[Version], discovered: Vec<Version>) -> Reconciliation {
    let mut applied_hashes: HashMap<&str, i64> = HashMap::new();
    let mut latest = 0i64;
    for ver in applied {
        applied_hashes.insert(ver.content_hash.as_str(), ver.id);
        latest = latest.max(ver.id);
    }

    let mut rec = Reconciliation::default();
    for ver in discovered {
        if applied_hashes.contains_key(ver.content_hash.as_str()) {
            continue;
        }
        if ver.id < latest {
            rec.missing.push(ver);
        } else {
            rec.unapplied.push(ver);
        }
    }
    rec.unapplied.sort_by_key(|v| v.id);
    rec.missing.sort_by_key(|v| v.id);
    rec
}

#[cfg(test)]
#[path = "reconcile_test.rs"]
mod tests;
