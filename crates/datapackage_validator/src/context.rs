//! The uniform input and output of every check.
//!
//! A check receives a [`CheckContext`] giving read-only access to the column
//! under test (if any), its table, every loaded table, the package metadata and
//! the declaration parameters. It returns a [`CheckOutput`].

use crate::{Column, Result, Table, Tables, TypedValue, ValidationError};
use datapackage_core::{CheckDeclaration, Field, FieldType, Package, Resource};

/// What a check produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutput {
    /// One verdict for the whole column or table
    Scalar(bool),
    /// One verdict per row; `None` means not applicable (e.g. a null cell)
    Rows(Vec<Option<bool>>),
    /// Offending values not tied to a row; empty means passed
    Values(Vec<String>),
}

impl CheckOutput {
    /// Returns true if nothing failed.
    pub fn passed(&self) -> bool {
        match self {
            CheckOutput::Scalar(passed) => *passed,
            CheckOutput::Rows(rows) => !rows.contains(&Some(false)),
            CheckOutput::Values(values) => values.is_empty(),
        }
    }

    /// Indices of failing rows.
    pub fn failing_rows(&self) -> Vec<usize> {
        match self {
            CheckOutput::Rows(rows) => rows
                .iter()
                .enumerate()
                .filter(|(_, verdict)| **verdict == Some(false))
                .map(|(row, _)| row)
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// Everything a check may look at.
#[derive(Debug, Clone, Copy)]
pub struct CheckContext<'a> {
    /// The declaration being run
    pub declaration: &'a CheckDeclaration,
    /// Package metadata
    pub package: &'a Package,
    /// All loaded tables
    pub tables: &'a Tables,
    /// The table under test
    pub table: &'a Table,
    /// The column under test, for column checks
    pub column: Option<Column<'a>>,
}

impl<'a> CheckContext<'a> {
    /// Name of the check being run.
    pub fn check_name(&self) -> &'a str {
        &self.declaration.check
    }

    /// Returns the column under test, or an error for table-level contexts.
    pub fn column(&self) -> Result<Column<'a>> {
        self.column
            .ok_or_else(|| ValidationError::ColumnRequired(self.declaration.check.clone()))
    }

    /// The resource describing the table under test.
    pub fn resource(&self) -> Option<&'a Resource> {
        self.package.resource(self.table.name())
    }

    /// The field describing the column under test.
    pub fn field(&self) -> Option<&'a Field> {
        let column = self.column?;
        self.field_in(self.table.name(), column.name)
    }

    /// The field describing `column` of `table`.
    pub fn field_in(&self, table: &str, column: &str) -> Option<&'a Field> {
        self.package.resource(table)?.field(column)
    }

    /// Field type of the column under test (`string` when undescribed).
    pub fn field_type(&self) -> FieldType {
        self.field().map(|f| f.field_type.clone()).unwrap_or_default()
    }

    /// Returns true if `raw` is a missing value of `table`.
    pub fn is_null_in(&self, table: &str, raw: &str) -> bool {
        match self.package.resource(table) {
            Some(resource) => resource.schema.is_missing(raw),
            None => raw.is_empty(),
        }
    }

    /// Returns true if `raw` is a missing value of the table under test.
    pub fn is_null(&self, raw: &str) -> bool {
        self.is_null_in(self.table.name(), raw)
    }

    /// Parses every cell of `column` of `table` by its declared field type.
    ///
    /// Null cells and cells that do not parse become `None`; type errors are
    /// reported by the type check, not by comparisons.
    pub fn typed_values(&self, table: &Table, column: &Column<'_>) -> Vec<Option<TypedValue>> {
        let field = self.field_in(table.name(), column.name);
        let field_type = field.map(|f| f.field_type.clone()).unwrap_or_default();
        let format = field.and_then(|f| f.format.as_deref());

        column
            .values
            .iter()
            .map(|raw| {
                if self.is_null_in(table.name(), raw) {
                    None
                } else {
                    TypedValue::parse(raw, &field_type, format).ok()
                }
            })
            .collect()
    }

    /// Comparable text of a key cell of `column` in `table`.
    ///
    /// Cells that parse as the field type are written back canonically, so
    /// `01` and `1` are the same integer key; other cells are trimmed. Null
    /// cells give `None`.
    pub fn key_text(&self, table: &Table, column: &str, raw: &str) -> Option<String> {
        if self.is_null_in(table.name(), raw) {
            return None;
        }

        let field = self.field_in(table.name(), column);
        let default = FieldType::default();
        let field_type = field.map(|f| &f.field_type).unwrap_or(&default);
        let format = field.and_then(|f| f.format.as_deref());
        Some(match TypedValue::parse(raw, field_type, format) {
            Ok(value) => value.to_string(),
            Err(_) => raw.trim().to_string(),
        })
    }

    /// Typed cells of the column under test.
    pub fn typed_column(&self) -> Result<Vec<Option<TypedValue>>> {
        let column = self.column()?;
        Ok(self.typed_values(self.table, &column))
    }

    /// Returns a string parameter, or `default`.
    pub fn param_str(&self, name: &str, default: &'a str) -> &'a str {
        self.declaration.param_str(name, default)
    }

    /// Returns a required string parameter.
    pub fn require_param_str(&self, name: &str) -> Result<&'a str> {
        self.declaration
            .param(name)
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                ValidationError::invalid_param(self.check_name(), name, "expected a string")
            })
    }

    /// Returns a required list-of-strings parameter.
    pub fn require_param_list(&self, name: &str) -> Result<Vec<String>> {
        self.declaration.param_list(name).ok_or_else(|| {
            ValidationError::invalid_param(self.check_name(), name, "expected a list of strings")
        })
    }

    /// Returns a required non-negative integer parameter.
    pub fn require_param_usize(&self, name: &str) -> Result<usize> {
        self.declaration
            .param(name)
            .and_then(|v| v.as_u64())
            .and_then(|v| usize::try_from(v).ok())
            .ok_or_else(|| {
                ValidationError::invalid_param(self.check_name(), name, "expected a non-negative integer")
            })
    }

    /// Parses a parameter as a value of the column's field type.
    pub fn require_param_typed(&self, name: &str) -> Result<TypedValue> {
        let value = self.declaration.param(name).ok_or_else(|| {
            ValidationError::invalid_param(self.check_name(), name, "missing")
        })?;
        let field = self.field();
        TypedValue::parse(
            &datapackage_core::value_text(value),
            &self.field_type(),
            field.and_then(|f| f.format.as_deref()),
        )
        .map_err(|message| ValidationError::invalid_param(self.check_name(), name, message))
    }
}
