//! Error types for strata-core

use thiserror::Error;

/// Core error type for Strata
#[derive(Error, Debug)]
pub enum CoreError {
    /// C001: Migration file name has no leading version digits
    #[error("[C001] Migration file has no version prefix: {file}")]
    MissingVersionPrefix { file: String },

    /// C002: Version 0 is reserved for the ledger sentinel
    #[error("[C002] Migration version must be greater than zero: {file}")]
    VersionZero { file: String },

    /// C003: Version prefix does not fit a 64-bit integer
    #[error("[C003] Migration version out of range: {file}")]
    VersionOutOfRange { file: String },

    /// C004: More than one SQL statement on a single line
    #[error("[C004] Line has multiple SQL statements: {line}")]
    MultiStatementLine { line: String },

    /// C005: Migration files must be UTF-8 text
    #[error("[C005] Migration file is not valid UTF-8")]
    InvalidUtf8,

    /// C006: Configuration file not found
    #[error("[C006] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// C007: Failed to parse configuration file
    #[error("[C007] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// C008: IO error
    #[error("[C008] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// C009: IO error with file path context
    #[error("[C009] Failed to read '{path}': {source}")]
    IoWithPath {
        path: String,
        source: std::io::Error,
    },
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
