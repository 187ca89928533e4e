//! Rollback command implementation

use anyhow::Result;

use crate::cli::{GlobalArgs, RollbackArgs};
use crate::commands::common::build_runner;

/// Execute the rollback command
pub async fn execute(args: &RollbackArgs, global: &GlobalArgs) -> Result<()> {
    let runner = build_runner(global)?;
    let resulting = runner.rollback(&args.file).await?;
    println!("strata: rolled database back to version {resulting}");
    Ok(())
}
