//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strata_core::config::CONFIG_FILE;
use strata_core::{Config, CoreError};
use strata_db::TargetDb;
use strata_engine::Runner;

use crate::cli::GlobalArgs;

/// Effective settings after layering flags and environment over the
/// optional strata.yml.
pub(crate) struct Settings {
    pub database: String,
    pub migrations_dir: PathBuf,
}

pub(crate) fn resolve_settings(global: &GlobalArgs) -> Result<Settings> {
    let config = match &global.config {
        Some(path) => Config::load(Path::new(path))
            .with_context(|| format!("failed to load config '{path}'"))?,
        None => match Config::load(Path::new(CONFIG_FILE)) {
            Ok(config) => config,
            // the project file is optional unless explicitly pointed at
            Err(CoreError::ConfigNotFound { .. }) => Config::default(),
            Err(e) => return Err(e.into()),
        },
    };

    Ok(Settings {
        database: global.database.clone().unwrap_or(config.database),
        migrations_dir: PathBuf::from(global.dir.clone().unwrap_or(config.migrations_dir)),
    })
}

/// Open the target database and build a runner with ctrl-c wired to
/// its cancel flag.
pub(crate) fn build_runner(global: &GlobalArgs) -> Result<Runner> {
    let settings = resolve_settings(global)?;
    if global.verbose {
        eprintln!("[verbose] database: {}", settings.database);
        eprintln!(
            "[verbose] migrations directory: {}",
            settings.migrations_dir.display()
        );
    }

    let db = Arc::new(TargetDb::new(&settings.database)?);
    let runner = Runner::new(db, settings.migrations_dir);

    let flag = runner.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nInterrupt received; stopping at the next version boundary...");
            flag.cancel();
        }
    });

    Ok(runner)
}
