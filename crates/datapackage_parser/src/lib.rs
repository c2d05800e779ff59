//! Parser for data package metadata and check documents.
//!
//! This module loads a data package metadata document (YAML or JSON) into the
//! strongly-typed [`Package`] structure and a checks document (a YAML list of
//! check declarations) into [`CheckDeclaration`]s. Every loaded package is
//! checked for structural integrity (unique resource names, existing key
//! fields) before it is returned.
//!
//! # Example
//!
//! ```rust
//! use datapackage_parser::parse_yaml;
//!
//! let yaml = r#"
//! name: boreholes
//! resources:
//!   - name: borehole
//!     schema:
//!       fields:
//!         - name: id
//!           type: integer
//!         - name: date
//!           type: date
//! "#;
//!
//! let package = parse_yaml(yaml).expect("Failed to parse package");
//! assert_eq!(package.resources[0].name, "borehole");
//! ```

use datapackage_core::{CheckDeclaration, Package, PackageError};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during parsing.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The document parsed but violates package invariants
    #[error("Invalid data package: {0}")]
    Integrity(#[from] PackageError),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported metadata file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// JSON format (.json)
    Json,
}

/// Parse a package from a YAML string.
///
/// # Example
///
/// ```rust
/// use datapackage_parser::parse_yaml;
///
/// let package = parse_yaml("resources: []").unwrap();
/// assert!(package.resources.is_empty());
/// ```
pub fn parse_yaml(content: &str) -> Result<Package> {
    let package: Package = serde_yaml_ng::from_str(content)?;
    package.check_integrity()?;
    Ok(package)
}

/// Parse a package from a JSON string.
///
/// # Example
///
/// ```rust
/// use datapackage_parser::parse_json;
///
/// let package = parse_json(r#"{"resources": [{"name": "t", "schema": {"fields": []}}]}"#).unwrap();
/// assert_eq!(package.resources[0].name, "t");
/// ```
pub fn parse_json(content: &str) -> Result<Package> {
    let package: Package = serde_json::from_str(content)?;
    package.check_integrity()?;
    Ok(package)
}

/// Detect the metadata format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `MetadataFormat::Yaml`
/// * `.json` → `MetadataFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<MetadataFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(MetadataFormat::Yaml),
        "json" => Ok(MetadataFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse a package from a file with automatic format detection.
///
/// The file is read fresh on every call; nothing is cached.
///
/// ```no_run
/// use datapackage_parser::parse_file;
/// use std::path::Path;
///
/// let package = parse_file(Path::new("datapackage.yaml")).unwrap();
/// println!("Loaded {} resources", package.resources.len());
/// ```
pub fn parse_file(path: &Path) -> Result<Package> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!("Parsing metadata from {}", path.display());

    match format {
        MetadataFormat::Yaml => parse_yaml(&content),
        MetadataFormat::Json => parse_json(&content),
    }
}

/// Parse check declarations from a YAML string.
///
/// The document is a list of declarations; an empty document declares no checks.
///
/// ```rust
/// use datapackage_parser::parse_checks_yaml;
///
/// let checks = parse_checks_yaml("- check: is_monotonic_increasing\n  table: borehole\n  column: id\n").unwrap();
/// assert_eq!(checks[0].check, "is_monotonic_increasing");
/// ```
pub fn parse_checks_yaml(content: &str) -> Result<Vec<CheckDeclaration>> {
    let blank = content
        .lines()
        .map(str::trim)
        .all(|line| line.is_empty() || line.starts_with('#'));
    if blank {
        return Ok(Vec::new());
    }
    let checks: Option<Vec<CheckDeclaration>> = serde_yaml_ng::from_str(content)?;
    Ok(checks.unwrap_or_default())
}

/// Parse check declarations from a file.
pub fn parse_checks_file(path: &Path) -> Result<Vec<CheckDeclaration>> {
    let content = std::fs::read_to_string(path)?;
    debug!("Parsing checks from {}", path.display());
    parse_checks_yaml(&content)
}
