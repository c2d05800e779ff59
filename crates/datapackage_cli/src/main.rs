mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use datapackage_core::ProjectConfig;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dpt")]
#[command(version, about = "Data package templates and validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory holding datapackage.yaml, checks.yaml, data/ and templates/
    #[arg(short = 'C', long, global = true, default_value = ".")]
    project: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Render templates/readme.html.jinja into build/readme.html
    #[command(alias = "build_readme")]
    BuildReadme,

    /// Write an Excel template to build/template.xlsx
    #[command(alias = "build_excel_template")]
    BuildExcelTemplate,

    /// Create a Google Sheets template and print its URL
    #[command(alias = "build_gsheets_template")]
    BuildGsheetsTemplate {
        /// Spreadsheet name
        name: String,
    },

    /// Validate data/*.csv against the metadata and checks.yaml
    #[command(alias = "validate_with_validator")]
    Validate {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Credentials may live in a .env file of the project or the working
    // directory; variables already set win, and missing files are fine
    dotenv::from_path(cli.project.join(".env")).ok();
    dotenv::dotenv().ok();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = ProjectConfig::new(cli.project);

    // Execute command
    match cli.command {
        Commands::BuildReadme => commands::build::readme(&config),
        Commands::BuildExcelTemplate => commands::build::excel_template(&config),
        Commands::BuildGsheetsTemplate { name } => {
            commands::build::gsheets_template(&config, &name).await
        }
        Commands::Validate { format } => commands::validate::execute(&config, &format),
    }
}
