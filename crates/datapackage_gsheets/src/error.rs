//! Error types for Google Sheets operations.

use datapackage_render::RenderError;
use thiserror::Error;

/// Result type for Google Sheets operations.
pub type Result<T> = std::result::Result<T, SheetsError>;

/// Errors that can occur while building a Google Sheets template.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// No service-account key configured
    #[error("Missing {}", crate::SERVICE_ACCOUNT_KEY_VAR)]
    MissingCredential,

    /// Service-account key could not be parsed or used for signing
    #[error("Invalid service account key: {0}")]
    InvalidCredential(String),

    /// A spreadsheet with the requested name is already visible
    #[error("Spreadsheet '{0}' already exists")]
    AlreadyExists(String),

    /// Token exchange failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Request could not be sent or its response read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Google API answered with an error status
    #[error("Google API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Header comments could not be rendered
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<jsonwebtoken::errors::Error> for SheetsError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        SheetsError::InvalidCredential(err.to_string())
    }
}
