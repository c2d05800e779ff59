//! Declarative check definitions.
//!
//! A check declaration names a registered check and says where to run it.
//! Declarations come from two places: the checks document (`checks.yaml`,
//! a YAML list of declarations) and the conversion of package metadata
//! into schema checks.
//!
//! ```yaml
//! - check: is_monotonic_increasing
//!   table: borehole
//!   column: id
//! - check: is_on_or_after_borehole_date
//!   table: measurement
//!   column: date
//!   params:
//!     foreign_key: borehole_id
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Named check parameters.
pub type Params = IndexMap<String, Value>;

/// A reference to a registered check and the table/column it applies to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDeclaration {
    /// Registered check name
    pub check: String,

    /// Table to run on; every loaded table when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,

    /// Column to run on; a table-level check when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// Check parameters
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub params: Params,

    /// Message overriding the registered failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckDeclaration {
    /// Declares a check by name.
    pub fn new(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            table: None,
            column: None,
            params: Params::new(),
            message: None,
        }
    }

    /// Restricts the check to a table.
    pub fn on_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Restricts the check to a column.
    pub fn on_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Adds a parameter.
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Overrides the failure message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Returns a parameter value.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Returns a string parameter, or `default` when absent or not a string.
    pub fn param_str<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.params
            .get(name)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Returns a list-of-strings parameter (a single string counts as a one-item list).
    pub fn param_list(&self, name: &str) -> Option<Vec<String>> {
        match self.params.get(name)? {
            Value::String(s) => Some(vec![s.clone()]),
            Value::Array(items) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string))
                .collect(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declaration_builder() {
        let decl = CheckDeclaration::new("is_monotonic_increasing")
            .on_table("borehole")
            .on_column("id")
            .with_message("Not sorted");

        assert_eq!(decl.check, "is_monotonic_increasing");
        assert_eq!(decl.table.as_deref(), Some("borehole"));
        assert_eq!(decl.column.as_deref(), Some("id"));
        assert_eq!(decl.message.as_deref(), Some("Not sorted"));
    }

    #[test]
    fn test_param_accessors() {
        let decl = CheckDeclaration::new("x")
            .with_param("reference", "borehole")
            .with_param("fields", vec!["a", "b"])
            .with_param("limit", 3);

        assert_eq!(decl.param_str("reference", "other"), "borehole");
        assert_eq!(decl.param_str("missing", "other"), "other");
        assert_eq!(decl.param_str("limit", "none"), "none");
        assert_eq!(
            decl.param_list("fields"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(decl.param_list("reference"), Some(vec!["borehole".to_string()]));
        assert_eq!(decl.param_list("limit"), None);
        assert_eq!(decl.param("limit"), Some(&Value::from(3)));
    }

    #[test]
    fn test_deserialize_minimal() {
        let decl: CheckDeclaration = serde_json::from_str(r#"{"check": "not_null"}"#).unwrap();

        assert_eq!(decl, CheckDeclaration::new("not_null"));
    }
}
