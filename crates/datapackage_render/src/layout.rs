//! Spreadsheet template layout.
//!
//! Describes what a template sheet looks like independently of where it is
//! written: one sheet per resource, a header row of field names carrying the
//! rendered header comments, and input validation derived from the field
//! types and constraints. Both the Excel writer and the Google Sheets writer
//! consume this layout.

use crate::HeaderComments;
use datapackage_core::{Field, FieldType, Package, value_text};
use serde_json::Value;

/// Narrowest column width, in characters.
pub const MIN_COLUMN_WIDTH: usize = 8;
/// Widest column width, in characters.
pub const MAX_COLUMN_WIDTH: usize = 50;

/// Input accepted in the data rows of a column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValidation {
    /// One of a list of values
    List(Vec<String>),
    /// Whole numbers, optionally bounded (inclusive)
    Integer { min: Option<i64>, max: Option<i64> },
    /// Decimal numbers, optionally bounded (inclusive)
    Decimal { min: Option<f64>, max: Option<f64> },
}

/// One column of a template sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    /// Header cell text (the field name)
    pub name: String,
    /// Note attached to the header cell
    pub comment: Option<String>,
    /// Validation of the cells below the header
    pub validation: Option<ColumnValidation>,
    /// Column width in characters
    pub width: usize,
}

/// One sheet of a template.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    /// Sheet name (the resource name)
    pub name: String,
    /// Columns in field order
    pub columns: Vec<ColumnLayout>,
}

/// Lays out one sheet per resource, in resource order.
///
/// Comments are taken positionally from `comments[resource]`; blank comments
/// are dropped.
pub fn template_layout(package: &Package, comments: &HeaderComments) -> Vec<SheetLayout> {
    package
        .resources
        .iter()
        .map(|resource| {
            let resource_comments = comments.get(&resource.name);
            let columns = resource
                .schema
                .fields
                .iter()
                .enumerate()
                .map(|(index, field)| ColumnLayout {
                    name: field.name.clone(),
                    comment: resource_comments
                        .and_then(|c| c.get(index))
                        .filter(|c| !c.trim().is_empty())
                        .cloned(),
                    validation: column_validation(field),
                    width: column_width(&field.name),
                })
                .collect();

            SheetLayout {
                name: resource.name.clone(),
                columns,
            }
        })
        .collect()
}

/// Derives the input validation of a field.
///
/// An `enum` constraint wins over the type; booleans become a `TRUE`/`FALSE`
/// list; integers and numbers are bounded by `minimum`/`maximum`.
pub fn column_validation(field: &Field) -> Option<ColumnValidation> {
    if let Some(allowed) = &field.constraints.allowed {
        return Some(ColumnValidation::List(allowed.iter().map(value_text).collect()));
    }

    let constraints = &field.constraints;
    match field.field_type {
        FieldType::Boolean => Some(ColumnValidation::List(vec![
            "TRUE".to_string(),
            "FALSE".to_string(),
        ])),
        FieldType::Integer => Some(ColumnValidation::Integer {
            min: constraints.minimum.as_ref().and_then(as_i64),
            max: constraints.maximum.as_ref().and_then(as_i64),
        }),
        FieldType::Number => Some(ColumnValidation::Decimal {
            min: constraints.minimum.as_ref().and_then(as_f64),
            max: constraints.maximum.as_ref().and_then(as_f64),
        }),
        _ => None,
    }
}

/// Width fitted to the header text, padded and clamped.
pub fn column_width(header: &str) -> usize {
    (header.chars().count() + 2).clamp(MIN_COLUMN_WIDTH, MAX_COLUMN_WIDTH)
}

// Bounds may be written as numbers or as numeric strings
fn as_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| value.as_str()?.trim().parse().ok())
}

fn as_f64(value: &Value) -> Option<f64> {
    value.as_f64().or_else(|| value.as_str()?.trim().parse().ok())
}
