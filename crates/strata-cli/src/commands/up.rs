//! Up command implementation

use anyhow::Result;

use crate::cli::GlobalArgs;
use crate::commands::common::build_runner;

/// Execute the up command
pub async fn execute(global: &GlobalArgs) -> Result<()> {
    let runner = build_runner(global)?;
    let final_version = runner.migrate().await?;
    println!("strata: database is at version {final_version}");
    Ok(())
}
