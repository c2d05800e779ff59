//! Error types for validation operations.
//!
//! Loading errors (unreadable data directory or CSV file) abort a validation
//! run. Every other error is caught by the engine and recorded in the report
//! as a check that could not run.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors that can occur during validation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Data directory could not be listed
    #[error("Failed to read data directory {path}: {source}")]
    DataDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    /// CSV file could not be read
    #[error("Failed to read CSV file {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },

    /// Check name not found in the registry
    #[error("Unknown check '{0}'")]
    UnknownCheck(String),

    /// Table not loaded
    #[error("Table '{0}' not found")]
    MissingTable(String),

    /// Column not present in the table
    #[error("Column '{column}' not found in table '{table}'")]
    MissingColumn { table: String, column: String },

    /// Column check declared without a column
    #[error("Check '{0}' requires a column")]
    ColumnRequired(String),

    /// Missing or malformed check parameter
    #[error("Invalid parameter '{name}' for check '{check}': {message}")]
    InvalidParam {
        check: String,
        name: String,
        message: String,
    },

    /// Invalid regex pattern
    #[error("Invalid regex pattern '{pattern}': {error}")]
    InvalidRegex { pattern: String, error: String },

    /// Generic validation error
    #[error("Validation error: {0}")]
    General(String),
}

impl ValidationError {
    /// Creates a new missing column error.
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Creates a new invalid parameter error.
    pub fn invalid_param(
        check: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidParam {
            check: check.into(),
            name: name.into(),
            message: message.into(),
        }
    }
}
