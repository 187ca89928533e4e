//! Command implementations for the Strata CLI

pub mod common;
pub mod rollback;
pub mod status;
pub mod up;
