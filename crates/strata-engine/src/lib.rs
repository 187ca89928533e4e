//! strata-engine - Migration engine for Strata
//!
//! Discovers versioned SQL migration files, reconciles them against
//! the ledger table inside the target database, and applies or rolls
//! back schema changes one transaction per version.

pub mod cancel;
pub mod error;
pub mod ledger;
pub mod runner;

pub use cancel::CancelFlag;
pub use error::{EngineError, EngineResult};
pub use ledger::Ledger;
pub use runner::{Runner, Status};
