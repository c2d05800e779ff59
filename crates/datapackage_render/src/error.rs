//! Error types for rendering operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Errors that can occur while rendering templates or writing outputs.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template or output file could not be read or written
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Template failed to parse or render
    #[error("Template error in {path}: {source}")]
    Template {
        path: PathBuf,
        source: minijinja::Error,
    },

    /// Excel workbook could not be built or saved
    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

impl RenderError {
    /// Creates a new I/O error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a new template error for a path.
    pub fn template(path: impl Into<PathBuf>, source: minijinja::Error) -> Self {
        Self::Template {
            path: path.into(),
            source,
        }
    }
}
