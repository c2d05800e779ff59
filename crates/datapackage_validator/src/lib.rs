//! # Datapackage Validator
//!
//! Validation of CSV data against package metadata. This crate provides:
//!
//! - Loading of `*.csv` files into all-string tables keyed by file stem
//! - Typed interpretation of cells according to the declared field types
//! - A registry of named checks sharing one signature
//! - Schema checks generated from metadata (types, constraints, keys)
//! - Custom checks for borehole data
//! - The engine running every declaration into a report
//!
//! ## Example
//!
//! ```rust
//! use datapackage_validator::{Table, Tables, Validator};
//! use datapackage_core::{CheckDeclaration, FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
//!
//! let package = PackageBuilder::new()
//!     .resource(
//!         ResourceBuilder::new("borehole")
//!             .field(FieldBuilder::new("id", FieldType::Integer).build())
//!             .build(),
//!     )
//!     .build();
//! let tables: Tables = [Table::from_columns("borehole", vec![("id", vec!["1", "2", "2"])])]
//!     .into_iter()
//!     .collect();
//!
//! let validator = Validator::from_package(&package).with_checks([
//!     CheckDeclaration::new("is_monotonic_increasing")
//!         .on_table("borehole")
//!         .on_column("id"),
//! ]);
//! let report = validator.validate(&package, &tables);
//!
//! assert!(report.passed());
//! ```

mod builtin;
mod context;
mod custom;
mod dataset;
mod engine;
mod error;
mod registry;
mod schema;
mod value;

pub use context::*;
pub use custom::{monotonic_increasing, on_or_after};
pub use dataset::*;
pub use engine::*;
pub use error::*;
pub use registry::*;
pub use schema::*;
pub use value::*;
