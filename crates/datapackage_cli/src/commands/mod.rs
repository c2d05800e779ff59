pub mod build;
pub mod validate;

use anyhow::{Context, Result};
use datapackage_core::{Package, ProjectConfig};
use datapackage_parser::parse_file;

/// Loads the project's metadata file.
pub fn load_package(config: &ProjectConfig) -> Result<Package> {
    let path = config.metadata_path();
    parse_file(&path).with_context(|| format!("Failed to load metadata file: {}", path.display()))
}
