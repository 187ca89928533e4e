//! strata-core - Core library for Strata
//!
//! This crate provides the database-free pieces of the migration
//! engine: the statement splitter, the migration file parser, version
//! identity, content hashing, the reconciler, and project
//! configuration.

pub mod checksum;
pub mod config;
pub mod error;
pub mod parse;
pub mod reconcile;
pub mod splitter;
pub mod version;

pub use checksum::{compute_checksum, HashingReader};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use parse::{parse_migration, ParsedMigration};
pub use reconcile::{reconcile, Reconciliation};
pub use splitter::StatementSplitter;
pub use version::{version_from_filename, Version};
