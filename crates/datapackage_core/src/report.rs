//! Validation report types.
//!
//! A report is the ordered list of check outcomes produced by one validation
//! run. Failing checks are information for the reader, not errors: the report
//! is always produced in full.

use serde::Serialize;
use std::fmt;

/// Outcome status of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    /// Every value satisfied the check
    Passed,
    /// At least one value (or the table as a whole) failed the check
    Failed,
    /// The check could not run (unknown check, missing table or column, bad parameters)
    Error,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckStatus::Passed => "passed",
            CheckStatus::Failed => "failed",
            CheckStatus::Error => "error",
        })
    }
}

/// A single failing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Zero-based data row index (header excluded)
    pub row: Option<usize>,
    /// Offending cell value, if any
    pub value: Option<String>,
}

/// Result of running one check against one table (and column).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckOutcome {
    /// Check name
    pub check: String,
    /// Table the check ran on
    pub table: Option<String>,
    /// Column the check ran on
    pub column: Option<String>,
    /// Outcome status
    pub status: CheckStatus,
    /// Failure or error message (empty when passed)
    pub message: String,
    /// Failing rows, in row order
    pub failures: Vec<Failure>,
}

impl CheckOutcome {
    /// Creates a passing outcome.
    pub fn passed(check: impl Into<String>, table: Option<&str>, column: Option<&str>) -> Self {
        Self::with_status(check, table, column, CheckStatus::Passed, String::new())
    }

    /// Creates a failing outcome.
    pub fn failed(
        check: impl Into<String>,
        table: Option<&str>,
        column: Option<&str>,
        message: impl Into<String>,
        failures: Vec<Failure>,
    ) -> Self {
        let mut outcome =
            Self::with_status(check, table, column, CheckStatus::Failed, message.into());
        outcome.failures = failures;
        outcome
    }

    /// Creates an outcome for a check that could not run.
    pub fn error(
        check: impl Into<String>,
        table: Option<&str>,
        column: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self::with_status(check, table, column, CheckStatus::Error, message.into())
    }

    fn with_status(
        check: impl Into<String>,
        table: Option<&str>,
        column: Option<&str>,
        status: CheckStatus,
        message: String,
    ) -> Self {
        Self {
            check: check.into(),
            table: table.map(str::to_string),
            column: column.map(str::to_string),
            status,
            message,
            failures: Vec::new(),
        }
    }

    /// Returns true if the check passed.
    pub fn is_passed(&self) -> bool {
        self.status == CheckStatus::Passed
    }

    /// Returns `table.column`, `table`, or an empty string.
    pub fn location(&self) -> String {
        match (&self.table, &self.column) {
            (Some(table), Some(column)) => format!("{}.{}", table, column),
            (Some(table), None) => table.clone(),
            (None, Some(column)) => column.clone(),
            (None, None) => String::new(),
        }
    }
}

/// One line of the tabulated detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRow {
    /// Check name
    pub check: String,
    /// Table name
    pub table: String,
    /// Column name
    pub column: String,
    /// Row index, empty for table-level failures
    pub row: String,
    /// Offending value
    pub value: String,
    /// Outcome message
    pub message: String,
}

impl DetailRow {
    /// Column headers of the detail view.
    pub const HEADERS: [&'static str; 6] = ["check", "table", "column", "row", "value", "message"];

    /// Returns the cells in header order.
    pub fn cells(&self) -> [&str; 6] {
        [
            self.check.as_str(),
            self.table.as_str(),
            self.column.as_str(),
            self.row.as_str(),
            self.value.as_str(),
            self.message.as_str(),
        ]
    }
}

/// Statistics about validation execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationStats {
    /// Number of tables loaded
    pub tables_loaded: usize,

    /// Number of data rows across all tables
    pub rows_validated: usize,

    /// Number of checks executed
    pub checks_run: usize,

    /// Validation duration in milliseconds
    pub duration_ms: u64,
}

/// Report of validation results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Check outcomes in execution order
    pub outcomes: Vec<CheckOutcome>,

    /// Validation statistics
    pub stats: ValidationStats,
}

impl ValidationReport {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: CheckOutcome) {
        self.outcomes.push(outcome);
    }

    /// Returns true if every check passed.
    pub fn passed(&self) -> bool {
        self.outcomes.iter().all(CheckOutcome::is_passed)
    }

    /// Counts outcomes with the given status.
    pub fn count(&self, status: CheckStatus) -> usize {
        self.outcomes.iter().filter(|o| o.status == status).count()
    }

    /// Returns the outcomes that did not pass.
    pub fn problems(&self) -> impl Iterator<Item = &CheckOutcome> {
        self.outcomes.iter().filter(|o| !o.is_passed())
    }

    /// Flattens non-passing outcomes into detail rows: one per failing value,
    /// or one per outcome when there is no value-level detail.
    pub fn detail_rows(&self) -> Vec<DetailRow> {
        let mut rows = Vec::new();

        for outcome in self.problems() {
            let base = DetailRow {
                check: outcome.check.clone(),
                table: outcome.table.clone().unwrap_or_default(),
                column: outcome.column.clone().unwrap_or_default(),
                row: String::new(),
                value: String::new(),
                message: outcome.message.clone(),
            };

            if outcome.failures.is_empty() {
                rows.push(base);
                continue;
            }

            for failure in &outcome.failures {
                rows.push(DetailRow {
                    row: failure.row.map(|r| r.to_string()).unwrap_or_default(),
                    value: failure.value.clone().unwrap_or_default(),
                    ..base.clone()
                });
            }
        }

        rows
    }
}
