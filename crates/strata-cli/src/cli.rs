//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Strata - schema migrations for DuckDB
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override config file path (default: strata.yml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Migrations directory
    #[arg(short = 'd', long, global = true, env = "STRATA_MIGRATIONS_DIR")]
    pub dir: Option<String>,

    /// DuckDB database file, or :memory:
    #[arg(long, global = true, env = "STRATA_DATABASE")]
    pub database: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply all pending migrations
    Up,

    /// Roll back to, and including, a migration file
    Rollback(RollbackArgs),

    /// Show applied, pending, and missing migrations
    Status(StatusArgs),
}

/// Arguments for the rollback command
#[derive(Args, Debug)]
pub struct RollbackArgs {
    /// Migration file name to roll back to (inclusive)
    pub file: String,
}

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: StatusOutput,
}

/// Status output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOutput {
    /// Human-readable table
    Table,
    /// Machine-readable JSON
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
