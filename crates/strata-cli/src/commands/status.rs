//! Status command implementation

use anyhow::Result;
use strata_core::Version;

use crate::cli::{GlobalArgs, StatusArgs, StatusOutput};
use crate::commands::common::build_runner;

/// Execute the status command
pub async fn execute(args: &StatusArgs, global: &GlobalArgs) -> Result<()> {
    let runner = build_runner(global)?;
    let status = runner.status().await?;

    match args.output {
        StatusOutput::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        StatusOutput::Table => {
            println!("Current version: {}", status.current);

            println!("\nApplied:");
            for ver in &status.applied {
                print_row(ver);
            }

            if !status.pending.is_empty() {
                println!("\nPending:");
                for ver in &status.pending {
                    print_row(ver);
                }
            }

            if !status.missing.is_empty() {
                println!("\nMissing (below current version, will not be applied):");
                for ver in &status.missing {
                    print_row(ver);
                }
            }
        }
    }
    Ok(())
}

fn print_row(ver: &Version) {
    let hash = if ver.content_hash.len() >= 12 {
        &ver.content_hash[..12]
    } else {
        ver.content_hash.as_str()
    };
    let source = if ver.source.is_empty() {
        "(sentinel)"
    } else {
        ver.source.as_str()
    };
    println!("  {:>6}  {:<40}  {}", ver.id, source, hash);
}
