//! Named check registry.
//!
//! Checks are plain functions registered under a name at start-up. The engine
//! looks every declaration up by name and calls the function with a
//! [`CheckContext`].

use crate::{CheckContext, CheckOutput, Result};
use indexmap::IndexMap;

/// Signature shared by every check.
pub type CheckFn = fn(&CheckContext<'_>) -> Result<CheckOutput>;

/// Where a check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Once per column; the context carries the column under test
    Column,
    /// Once per table; the context has no column
    Table,
}

/// A check function with its metadata.
#[derive(Debug, Clone)]
pub struct RegisteredCheck {
    /// Registered name
    pub name: &'static str,
    /// Message reported when the check fails
    pub message: &'static str,
    /// Where the check runs
    pub axis: Axis,
    /// The check itself
    pub func: CheckFn,
}

impl RegisteredCheck {
    /// Creates a column check.
    pub const fn column(name: &'static str, message: &'static str, func: CheckFn) -> Self {
        Self {
            name,
            message,
            axis: Axis::Column,
            func,
        }
    }

    /// Creates a table check.
    pub const fn table(name: &'static str, message: &'static str, func: CheckFn) -> Self {
        Self {
            name,
            message,
            axis: Axis::Table,
            func,
        }
    }
}

/// Check name → check.
#[derive(Debug, Clone, Default)]
pub struct CheckRegistry {
    checks: IndexMap<&'static str, RegisteredCheck>,
}

impl CheckRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the schema checks and the custom checks.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        crate::builtin::register(&mut registry);
        crate::custom::register(&mut registry);
        registry
    }

    /// Registers a check, replacing any check with the same name.
    pub fn register(&mut self, check: RegisteredCheck) {
        self.checks.insert(check.name, check);
    }

    /// Looks a check up by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredCheck> {
        self.checks.get(name)
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.keys().copied()
    }

    /// Number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}
