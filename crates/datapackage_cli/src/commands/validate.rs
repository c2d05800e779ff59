use anyhow::{Context, Result};
use datapackage_core::ProjectConfig;
use datapackage_parser::parse_checks_file;
use datapackage_validator::{Tables, Validator};
use tracing::info;

use super::load_package;
use crate::output;

pub fn execute(config: &ProjectConfig, format: &str) -> Result<()> {
    let package = load_package(config)?;

    let checks_path = config.checks_path();
    let checks = parse_checks_file(&checks_path)
        .with_context(|| format!("Failed to load checks file: {}", checks_path.display()))?;
    info!("Loaded {} declared checks", checks.len());

    let data_path = config.data_path();
    let tables = Tables::load_dir(&data_path)
        .with_context(|| format!("Failed to load data from {}", data_path.display()))?;
    info!(
        "Loaded {} tables ({} rows) from {}",
        tables.len(),
        tables.total_rows(),
        data_path.display()
    );

    let report = Validator::from_package(&package)
        .with_checks(checks)
        .validate(&package, &tables);

    // Check failures are reported, never turned into a failing exit status
    output::print_validation_report(&report, format)?;
    Ok(())
}
