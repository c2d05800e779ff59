//! # Data Package Core
//!
//! Core data structures and types for the data package tooling.
//!
//! A data package is a metadata document describing a set of named tabular
//! resources. Each resource has a table schema: an ordered list of fields
//! (columns) with a type, descriptive attributes and value constraints, plus
//! optional primary and foreign keys. The other crates of the workspace render
//! documentation and spreadsheet templates from a package and validate CSV data
//! against it.
//!
//! ## Key Concepts
//!
//! - **Package**: the metadata document, a list of resources
//! - **Resource**: one named table
//! - **Schema**: the ordered field definitions of a resource
//! - **Check declaration**: a named check and the table/column it applies to
//! - **Validation report**: the collected outcomes of running all checks
//!
//! ## Example
//!
//! ```rust
//! use datapackage_core::{FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
//!
//! let package = PackageBuilder::new()
//!     .name("boreholes")
//!     .resource(
//!         ResourceBuilder::new("borehole")
//!             .field(
//!                 FieldBuilder::new("id", FieldType::Integer)
//!                     .description("Unique borehole identifier")
//!                     .required()
//!                     .build(),
//!             )
//!             .field(FieldBuilder::new("date", FieldType::Date).build())
//!             .primary_key("id")
//!             .build(),
//!     )
//!     .build();
//!
//! assert!(package.check_integrity().is_ok());
//! ```

pub mod builder;
pub mod checks;
pub mod config;
pub mod error;
pub mod package;
pub mod report;

pub use builder::*;
pub use checks::*;
pub use config::*;
pub use error::*;
pub use package::*;
pub use report::*;
