//! Error types for data packages.
//!
//! This module defines the errors raised when a metadata document violates
//! the structural invariants of a data package.

use thiserror::Error;

/// Result type for data package operations.
pub type Result<T> = std::result::Result<T, PackageError>;

/// Main error type for data package operations.
#[derive(Error, Debug)]
pub enum PackageError {
    /// Two resources share a name
    #[error("Duplicate resource name: {0}")]
    DuplicateResource(String),

    /// Two fields of one schema share a name
    #[error("Duplicate field '{field}' in resource '{resource}'")]
    DuplicateField {
        /// Resource name
        resource: String,
        /// Repeated field name
        field: String,
    },

    /// A key names a field the schema does not define
    #[error("Key field '{field}' not found in resource '{resource}'")]
    UnknownKeyField {
        /// Resource name
        resource: String,
        /// Missing field name
        field: String,
    },

    /// A foreign key references a resource the package does not define
    #[error("Resource '{resource}' references unknown resource '{reference}'")]
    UnknownReference {
        /// Referencing resource
        resource: String,
        /// Referenced resource
        reference: String,
    },

    /// Local and referenced key fields differ in number
    #[error("Foreign key of resource '{resource}' does not match the key length of '{reference}'")]
    KeyLengthMismatch {
        /// Referencing resource
        resource: String,
        /// Referenced resource
        reference: String,
    },

    /// A `pattern` constraint is not a valid regular expression
    #[error("Invalid pattern for field '{field}' in resource '{resource}': {error}")]
    InvalidPattern {
        /// Resource name
        resource: String,
        /// Field name
        field: String,
        /// Regex compilation error
        error: String,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
