//! strata-db - Target database layer for Strata
//!
//! Wraps the DuckDB connection the engine executes against: opening,
//! current-schema lookup, existence probes, and closure-scoped
//! transactions.

pub mod connection;
pub mod error;

pub use connection::TargetDb;
pub use error::{DbError, DbResult};
