//! Tables of string cells, loaded from CSV files.
//!
//! Every cell is kept as the raw string read from the file; whether a cell
//! counts as null, and how it is typed, is decided per check from the package
//! metadata.

use crate::{Result, ValidationError};
use indexmap::IndexMap;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// A borrowed view of one column.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    /// Column name
    pub name: &'a str,
    /// Cell values in row order
    pub values: &'a [String],
}

impl<'a> Column<'a> {
    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the cell at `row`.
    pub fn get(&self, row: usize) -> Option<&'a str> {
        self.values.get(row).map(String::as_str)
    }
}

/// A named table stored column by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    name: String,
    columns: IndexMap<String, Vec<String>>,
    rows: usize,
}

impl Table {
    /// Creates an empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: IndexMap::new(),
            rows: 0,
        }
    }

    /// Builds a table from `(column, values)` pairs.
    ///
    /// Shorter columns are padded with empty cells to the longest column.
    pub fn from_columns<N, V>(name: impl Into<String>, columns: Vec<(N, Vec<V>)>) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        let mut table = Self::new(name);
        for (column, values) in columns {
            let values: Vec<String> = values.into_iter().map(Into::into).collect();
            table.rows = table.rows.max(values.len());
            table.columns.insert(column.into(), values);
        }
        let rows = table.rows;
        for values in table.columns.values_mut() {
            values.resize(rows, String::new());
        }
        table
    }

    /// Reads a CSV file with a header row. All cells are kept as strings.
    ///
    /// Repeated header names get a `.1`, `.2`, ... suffix.
    pub fn from_csv(name: impl Into<String>, path: &Path) -> Result<Self> {
        let csv_error = |source| ValidationError::Csv {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(path)
            .map_err(csv_error)?;

        let mut names: Vec<String> = Vec::new();
        for header in reader.headers().map_err(csv_error)? {
            let mut candidate = header.to_string();
            let mut suffix = 1;
            while names.contains(&candidate) {
                candidate = format!("{}.{}", header, suffix);
                suffix += 1;
            }
            names.push(candidate);
        }

        let mut columns: Vec<Vec<String>> = vec![Vec::new(); names.len()];
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            for (index, values) in columns.iter_mut().enumerate() {
                values.push(record.get(index).unwrap_or_default().to_string());
            }
        }

        let table = Self::from_columns(name, names.into_iter().zip(columns).collect());
        debug!(
            "Loaded table '{}' ({} rows, {} columns) from {}",
            table.name,
            table.rows,
            table.columns.len(),
            path.display()
        );
        Ok(table)
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Column names in file order.
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// Returns true if the column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Returns a column by name.
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        self.columns
            .get_key_value(name)
            .map(|(name, values)| Column { name, values })
    }

    /// Returns a column by name, or a missing column error.
    pub fn require_column(&self, name: &str) -> Result<Column<'_>> {
        self.column(name)
            .ok_or_else(|| ValidationError::missing_column(&self.name, name))
    }
}

/// Tables keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    tables: BTreeMap<String, Table>,
}

impl Tables {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every `*.csv` file of a directory, keyed by file stem.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let dir_error = |source| ValidationError::DataDirectory {
            path: dir.to_path_buf(),
            source,
        };

        let mut tables = Self::new();
        for entry in std::fs::read_dir(dir).map_err(dir_error)? {
            let path = entry.map_err(dir_error)?.path();
            let is_csv = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
            if !is_csv || !path.is_file() {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            tables.insert(Table::from_csv(stem, &path)?);
        }

        Ok(tables)
    }

    /// Adds (or replaces) a table.
    pub fn insert(&mut self, table: Table) {
        self.tables.insert(table.name.clone(), table);
    }

    /// Returns a table by name.
    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    /// Returns a table by name, or a missing table error.
    pub fn require(&self, name: &str) -> Result<&Table> {
        self.get(name)
            .ok_or_else(|| ValidationError::MissingTable(name.to_string()))
    }

    /// Iterates over tables in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no table is loaded.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of rows across all tables.
    pub fn total_rows(&self) -> usize {
        self.iter().map(Table::len).sum()
    }
}

impl FromIterator<Table> for Tables {
    fn from_iter<T: IntoIterator<Item = Table>>(iter: T) -> Self {
        let mut tables = Self::new();
        for table in iter {
            tables.insert(table);
        }
        tables
    }
}
