//! Schema checks.
//!
//! These are the checks generated from package metadata (see
//! [`package_to_checks`](crate::package_to_checks)). Column checks skip null
//! cells; table checks skip rows with a null key cell.

use crate::{
    CheckContext, CheckOutput, CheckRegistry, Column, RegisteredCheck, Result, Table,
    TypedValue, ValidationError,
};
use datapackage_core::FieldType;
use regex::Regex;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Registers every schema check.
pub fn register(registry: &mut CheckRegistry) {
    for check in [
        RegisteredCheck::table("has_columns", "Missing columns", has_columns),
        RegisteredCheck::column("is_type", "Values do not match the field type", is_type),
        RegisteredCheck::column("not_null", "Missing required values", not_null),
        RegisteredCheck::column("is_unique", "Duplicate values", is_unique),
        RegisteredCheck::column("in_enum", "Values not in the allowed list", in_enum),
        RegisteredCheck::column("is_minimum", "Values below the minimum", is_minimum),
        RegisteredCheck::column("is_maximum", "Values above the maximum", is_maximum),
        RegisteredCheck::column("min_length", "Values shorter than the minimum length", min_length),
        RegisteredCheck::column("max_length", "Values longer than the maximum length", max_length),
        RegisteredCheck::column("matches_pattern", "Values do not match the pattern", matches_pattern),
        RegisteredCheck::table("unique_rows", "Duplicate primary key", unique_rows),
        RegisteredCheck::table(
            "in_foreign_table",
            "Foreign key not found in the referenced table",
            in_foreign_table,
        ),
    ] {
        registry.register(check);
    }
}

/// Applies `verdict` to every non-null cell of the column under test.
fn per_cell(
    context: &CheckContext<'_>,
    mut verdict: impl FnMut(&str) -> Option<bool>,
) -> Result<CheckOutput> {
    let column = context.column()?;
    Ok(CheckOutput::Rows(
        column
            .values
            .iter()
            .map(|raw| {
                if context.is_null(raw) {
                    None
                } else {
                    verdict(raw)
                }
            })
            .collect(),
    ))
}

/// Every expected column exists. Expected columns default to the schema fields.
fn has_columns(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let expected = match context.declaration.param_list("columns") {
        Some(columns) => columns,
        None => context
            .resource()
            .map(|r| r.schema.fields.iter().map(|f| f.name.clone()).collect())
            .unwrap_or_default(),
    };

    Ok(CheckOutput::Values(
        expected
            .into_iter()
            .filter(|name| !context.table.has_column(name))
            .collect(),
    ))
}

/// Values parse as the field type (or the `type` parameter).
fn is_type(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let field_type = match context.declaration.param("type") {
        Some(value) => serde_json::from_value::<FieldType>(value.clone()).map_err(|e| {
            ValidationError::invalid_param(context.check_name(), "type", e.to_string())
        })?,
        None => context.field_type(),
    };
    let format = context.field().and_then(|f| f.format.as_deref());

    per_cell(context, |raw| {
        Some(TypedValue::parse(raw, &field_type, format).is_ok())
    })
}

fn not_null(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let column = context.column()?;
    Ok(CheckOutput::Rows(
        column
            .values
            .iter()
            .map(|raw| Some(!context.is_null(raw)))
            .collect(),
    ))
}

/// Non-null values occur once; repeats after the first occurrence fail.
fn is_unique(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let column = context.column()?;
    let mut seen = HashSet::new();
    per_cell(context, |raw| {
        Some(seen.insert(context.key_text(context.table, column.name, raw)?))
    })
}

/// Values are among `values`. Compared typed when both sides parse.
fn in_enum(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let allowed = context.require_param_list("values").or_else(|_| {
        context
            .declaration
            .param("values")
            .and_then(|v| v.as_array())
            .map(|items| items.iter().map(datapackage_core::value_text).collect())
            .ok_or_else(|| {
                ValidationError::invalid_param(context.check_name(), "values", "expected a list")
            })
    })?;

    let field_type = context.field_type();
    let format = context.field().and_then(|f| f.format.as_deref());
    let typed_allowed: Vec<Option<TypedValue>> = allowed
        .iter()
        .map(|v| TypedValue::parse(v, &field_type, format).ok())
        .collect();

    per_cell(context, |raw| {
        let typed = TypedValue::parse(raw, &field_type, format).ok();
        let found = allowed.iter().zip(&typed_allowed).any(|(text, value)| {
            match (&typed, value) {
                (Some(a), Some(b)) => a == b,
                _ => text == raw,
            }
        });
        Some(found)
    })
}

/// Compares each typed cell against a typed bound. Unparsable cells are left
/// to `is_type`.
fn compare_to(
    context: &CheckContext<'_>,
    param: &str,
    accept: fn(Ordering) -> bool,
) -> Result<CheckOutput> {
    let bound = context.require_param_typed(param)?;
    let values = context.typed_column()?;

    Ok(CheckOutput::Rows(
        values
            .into_iter()
            .map(|value| {
                let ordering = value?.partial_cmp(&bound)?;
                Some(accept(ordering))
            })
            .collect(),
    ))
}

fn is_minimum(context: &CheckContext<'_>) -> Result<CheckOutput> {
    compare_to(context, "min", Ordering::is_ge)
}

fn is_maximum(context: &CheckContext<'_>) -> Result<CheckOutput> {
    compare_to(context, "max", Ordering::is_le)
}

fn min_length(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let length = context.require_param_usize("length")?;
    per_cell(context, |raw| Some(raw.chars().count() >= length))
}

fn max_length(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let length = context.require_param_usize("length")?;
    per_cell(context, |raw| Some(raw.chars().count() <= length))
}

/// Whole values match `pattern`.
fn matches_pattern(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let pattern = context.require_param_str("pattern")?;
    let regex = Regex::new(&format!("^(?:{})$", pattern)).map_err(|e| {
        ValidationError::InvalidRegex {
            pattern: pattern.to_string(),
            error: e.to_string(),
        }
    })?;

    per_cell(context, |raw| Some(regex.is_match(raw)))
}

/// Key tuple of each row, typed by the key fields; `None` when any key cell
/// is null.
fn row_keys(context: &CheckContext<'_>, table: &Table, columns: &[Column<'_>]) -> Vec<Option<Vec<String>>> {
    (0..table.len())
        .map(|row| {
            columns
                .iter()
                .map(|column| {
                    let raw = column.get(row).unwrap_or_default();
                    context.key_text(table, column.name, raw)
                })
                .collect()
        })
        .collect()
}

fn require_columns<'t>(table: &'t Table, names: &[String]) -> Result<Vec<Column<'t>>> {
    names.iter().map(|name| table.require_column(name)).collect()
}

/// Rows are unique over `columns`.
fn unique_rows(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let names = context.require_param_list("columns")?;
    let columns = require_columns(context.table, &names)?;

    let mut seen = HashSet::new();
    Ok(CheckOutput::Rows(
        row_keys(context, context.table, &columns)
            .into_iter()
            .map(|key| Some(seen.insert(key?)))
            .collect(),
    ))
}

/// Every `columns` tuple appears as a `reference_columns` tuple of the
/// `reference` table. The reference defaults to the table itself.
fn in_foreign_table(context: &CheckContext<'_>) -> Result<CheckOutput> {
    let names = context.require_param_list("columns")?;
    let reference_name = context.param_str("reference", context.table.name());
    let reference_names = context
        .declaration
        .param_list("reference_columns")
        .unwrap_or_else(|| names.clone());

    if names.len() != reference_names.len() {
        return Err(ValidationError::invalid_param(
            context.check_name(),
            "reference_columns",
            format!("expected {} columns", names.len()),
        ));
    }

    let reference = context.tables.require(reference_name)?;
    let reference_columns = require_columns(reference, &reference_names)?;
    let known: HashSet<Vec<String>> = row_keys(context, reference, &reference_columns)
        .into_iter()
        .flatten()
        .collect();

    let columns = require_columns(context.table, &names)?;
    Ok(CheckOutput::Rows(
        row_keys(context, context.table, &columns)
            .into_iter()
            .map(|key| Some(known.contains(&key?)))
            .collect(),
    ))
}
