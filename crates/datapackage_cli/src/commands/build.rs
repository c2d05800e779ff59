use anyhow::{Context, Result};
use datapackage_core::ProjectConfig;
use datapackage_gsheets::{GoogleConfig, build_gsheets_template};
use datapackage_render::{build_excel_template, build_readme};
use tracing::info;

use super::load_package;
use crate::output;

pub fn readme(config: &ProjectConfig) -> Result<()> {
    let package = load_package(config)?;
    let path = build_readme(&package, config).context("Failed to build README")?;

    output::print_success(&format!("README written to {}", path.display()));
    Ok(())
}

pub fn excel_template(config: &ProjectConfig) -> Result<()> {
    let package = load_package(config)?;
    let path = build_excel_template(&package, config).context("Failed to build Excel template")?;

    output::print_success(&format!("Excel template written to {}", path.display()));
    Ok(())
}

pub async fn gsheets_template(config: &ProjectConfig, name: &str) -> Result<()> {
    let google = GoogleConfig::from_env();
    // Fail on a missing key before reading anything else
    google.service_account_key()?;

    let package = load_package(config)?;
    info!("Building Google Sheets template '{}'", name);

    let url = build_gsheets_template(name, &package, config, &google)
        .await
        .with_context(|| format!("Failed to build Google Sheets template '{}'", name))?;

    println!("{}", url);
    Ok(())
}
