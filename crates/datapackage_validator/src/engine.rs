//! Main validation engine.
//!
//! This module provides the `Validator` that runs every check declaration
//! against the loaded tables and collects the outcomes into a report.

use crate::{
    package_to_checks, Axis, CheckContext, CheckOutput, CheckRegistry, Column, RegisteredCheck,
    Table, Tables, ValidationError,
};
use datapackage_core::{
    CheckDeclaration, CheckOutcome, Failure, Package, ValidationReport, ValidationStats,
};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Validation engine.
///
/// Holds a check registry and an ordered list of declarations. Outcomes are
/// reported in declaration order; a declaration without a table runs on every
/// table in name order.
///
/// # Example
///
/// ```rust
/// use datapackage_validator::{Table, Tables, Validator};
/// use datapackage_core::{FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
///
/// let package = PackageBuilder::new()
///     .resource(
///         ResourceBuilder::new("borehole")
///             .field(FieldBuilder::new("id", FieldType::Integer).required().build())
///             .build(),
///     )
///     .build();
/// let tables: Tables = [Table::from_columns("borehole", vec![("id", vec!["1", ""])])]
///     .into_iter()
///     .collect();
///
/// let report = Validator::from_package(&package).validate(&package, &tables);
///
/// assert!(!report.passed());
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: CheckRegistry,
    checks: Vec<CheckDeclaration>,
}

impl Validator {
    /// Creates a validator with no declarations.
    pub fn new(registry: CheckRegistry) -> Self {
        Self {
            registry,
            checks: Vec::new(),
        }
    }

    /// Creates a validator with the built-in registry and the schema checks
    /// of a package.
    pub fn from_package(package: &Package) -> Self {
        Self::new(CheckRegistry::with_builtins()).with_checks(package_to_checks(package))
    }

    /// Appends declarations.
    pub fn with_checks(mut self, checks: impl IntoIterator<Item = CheckDeclaration>) -> Self {
        self.checks.extend(checks);
        self
    }

    /// The declarations, in run order.
    pub fn checks(&self) -> &[CheckDeclaration] {
        &self.checks
    }

    /// The check registry.
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Runs every declaration and returns the report.
    ///
    /// Failing checks, unknown checks and missing tables or columns are
    /// recorded as outcomes; this never fails.
    pub fn validate(&self, package: &Package, tables: &Tables) -> ValidationReport {
        let start = Instant::now();
        let mut report = ValidationReport::new();

        info!(
            "Running {} checks against {} tables",
            self.checks.len(),
            tables.len()
        );

        for declaration in &self.checks {
            self.run_declaration(declaration, package, tables, &mut report);
        }

        report.stats = ValidationStats {
            tables_loaded: tables.len(),
            rows_validated: tables.total_rows(),
            checks_run: report.outcomes.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        info!(
            "Validation finished: {} outcomes, {} problems",
            report.outcomes.len(),
            report.problems().count()
        );
        report
    }

    fn run_declaration(
        &self,
        declaration: &CheckDeclaration,
        package: &Package,
        tables: &Tables,
        report: &mut ValidationReport,
    ) {
        let table_name = declaration.table.as_deref();
        let column_name = declaration.column.as_deref();

        let Some(check) = self.registry.get(&declaration.check) else {
            let error = ValidationError::UnknownCheck(declaration.check.clone());
            warn!("{}", error);
            report.push(CheckOutcome::error(
                &declaration.check,
                table_name,
                column_name,
                error.to_string(),
            ));
            return;
        };

        let targets: Vec<&Table> = match table_name {
            Some(name) => match tables.require(name) {
                Ok(table) => vec![table],
                Err(error) => {
                    warn!("{}: {}", declaration.check, error);
                    report.push(CheckOutcome::error(
                        &declaration.check,
                        table_name,
                        column_name,
                        error.to_string(),
                    ));
                    return;
                }
            },
            // Without a table, a column check only targets tables holding the column
            None => tables
                .iter()
                .filter(|table| column_name.is_none_or(|column| table.has_column(column)))
                .collect(),
        };

        if targets.is_empty() {
            if let Some(column) = column_name {
                let error =
                    ValidationError::General(format!("Column '{}' not found in any table", column));
                report.push(CheckOutcome::error(
                    &declaration.check,
                    None,
                    column_name,
                    error.to_string(),
                ));
            }
            return;
        }

        for table in targets {
            let base = CheckContext {
                declaration,
                package,
                tables,
                table,
                column: None,
            };

            match (check.axis, column_name) {
                (Axis::Table, _) => report.push(run_check(check, &base)),
                (Axis::Column, Some(name)) => match table.require_column(name) {
                    Ok(column) => report.push(run_check(check, &CheckContext {
                        column: Some(column),
                        ..base
                    })),
                    Err(error) => report.push(CheckOutcome::error(
                        &declaration.check,
                        Some(table.name()),
                        Some(name),
                        error.to_string(),
                    )),
                },
                (Axis::Column, None) => {
                    for name in table.column_names() {
                        report.push(run_check(check, &CheckContext {
                            column: table.column(name),
                            ..base
                        }));
                    }
                }
            }
        }
    }
}

/// Runs one check in one context and turns its output into an outcome.
fn run_check(check: &RegisteredCheck, context: &CheckContext<'_>) -> CheckOutcome {
    let declaration = context.declaration;
    let table = Some(context.table.name());
    let column = context
        .column
        .map(|c| c.name)
        .or(declaration.column.as_deref());

    debug!(
        "Running check '{}' on {}{}",
        check.name,
        context.table.name(),
        column.map(|c| format!(".{}", c)).unwrap_or_default()
    );

    let output = match (check.func)(context) {
        Ok(output) => output,
        Err(error) => {
            warn!("Check '{}' could not run: {}", check.name, error);
            return CheckOutcome::error(&declaration.check, table, column, error.to_string());
        }
    };

    if output.passed() {
        return CheckOutcome::passed(&declaration.check, table, column);
    }

    let message = declaration.message.as_deref().unwrap_or(check.message);
    let failures = match &output {
        CheckOutput::Scalar(_) => Vec::new(),
        CheckOutput::Rows(_) => output
            .failing_rows()
            .into_iter()
            .map(|row| Failure {
                row: Some(row),
                value: row_value(context, row),
            })
            .collect(),
        CheckOutput::Values(values) => values
            .iter()
            .map(|value| Failure {
                row: None,
                value: Some(value.clone()),
            })
            .collect(),
    };

    CheckOutcome::failed(&declaration.check, table, column, message, failures)
}

/// The cell (column checks) or key cells (table checks with `columns`) of a row.
fn row_value(context: &CheckContext<'_>, row: usize) -> Option<String> {
    if let Some(column) = context.column {
        return column.get(row).map(str::to_string);
    }

    let names = context.declaration.param_list("columns")?;
    let cells: Vec<&str> = names
        .iter()
        .filter_map(|name| context.table.column(name))
        .map(|column: Column<'_>| column.get(row).unwrap_or_default())
        .collect();
    Some(cells.join(", "))
}
