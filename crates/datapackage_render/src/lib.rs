//! # Datapackage Render
//!
//! Outputs built from package metadata:
//!
//! - Header comments: one rendered Jinja template per field
//! - The README: the whole package rendered through a Jinja template
//! - Spreadsheet template layouts (shared with the Google Sheets writer)
//! - The Excel template workbook
//!
//! ## Example
//!
//! ```rust,no_run
//! use datapackage_core::ProjectConfig;
//! use datapackage_parser::parse_file;
//! use datapackage_render::{build_excel_template, build_readme};
//!
//! let config = ProjectConfig::new(".");
//! let package = parse_file(&config.metadata_path()).unwrap();
//!
//! build_readme(&package, &config).unwrap();
//! build_excel_template(&package, &config).unwrap();
//! ```

mod error;
mod excel;
mod layout;
mod template;

pub use error::*;
pub use excel::*;
pub use layout::*;
pub use template::{
    HeaderComments, build_readme, environment, render_file, render_header_comments,
};
