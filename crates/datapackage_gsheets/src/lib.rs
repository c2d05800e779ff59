//! Google Sheets templates for data packages.
//!
//! This crate builds a spreadsheet template in Google Sheets: one sheet per
//! resource with a frozen header row, header notes and data validation,
//! following the same layout as the Excel template. It authenticates as a
//! service account and talks to the Sheets and Drive REST APIs through the
//! [`SheetsClient`] trait.
//!
//! # Example
//!
//! ```no_run
//! use datapackage_core::ProjectConfig;
//! use datapackage_gsheets::{GoogleConfig, build_gsheets_template};
//! use datapackage_parser::parse_file;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let project = ProjectConfig::new(".");
//! let package = parse_file(&project.metadata_path())?;
//!
//! let url = build_gsheets_template("Boreholes", &package, &project, &GoogleConfig::from_env()).await?;
//! println!("{}", url);
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod requests;
mod template;

pub use auth::{Claims, SCOPES, signed_assertion};
pub use client::*;
pub use config::*;
pub use error::*;
pub use requests::*;
pub use template::*;
