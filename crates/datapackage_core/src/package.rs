//! Data package types and structures.
//!
//! This module contains the core types describing a data package: the
//! package itself, its tabular resources, their table schemas, and the
//! fields (columns) of each schema. Field names and key spellings follow the
//! Frictionless Table Schema conventions (`primaryKey`, `foreignKeys`,
//! `missingValues`, `minLength`, ...).

use crate::{PackageError, Result};
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Arbitrary extra attributes, kept in document order.
///
/// Templates may reference any attribute of the metadata document, so
/// anything the typed structures don't model is preserved here.
pub type Attributes = IndexMap<String, Value>;

/// A data package describing a set of named tabular resources.
///
/// # Example
///
/// ```rust
/// use datapackage_core::{FieldBuilder, FieldType, PackageBuilder, ResourceBuilder};
///
/// let package = PackageBuilder::new()
///     .name("boreholes")
///     .resource(
///         ResourceBuilder::new("borehole")
///             .field(FieldBuilder::new("id", FieldType::Integer).required().build())
///             .field(FieldBuilder::new("date", FieldType::Date).build())
///             .build(),
///     )
///     .build();
///
/// assert_eq!(package.resources[0].schema.fields.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Machine-readable package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Tabular resources, in document order
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Any other package attribute (licenses, contributors, ...)
    #[serde(flatten)]
    pub extra: Attributes,
}

impl Package {
    /// Looks up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&Resource> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Returns the resource names in document order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }

    /// Checks the structural invariants of the package.
    ///
    /// * resource names are unique
    /// * field names are unique within each schema
    /// * primary and foreign key fields exist
    /// * foreign keys reference existing resources and fields
    /// * `pattern` constraints are valid regular expressions
    pub fn check_integrity(&self) -> Result<()> {
        let mut names = HashSet::new();
        for resource in &self.resources {
            if !names.insert(resource.name.as_str()) {
                return Err(PackageError::DuplicateResource(resource.name.clone()));
            }
        }

        for resource in &self.resources {
            resource.check_integrity(self)?;
        }

        Ok(())
    }
}

/// A named tabular resource (one table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource name, also the CSV file stem of its data
    pub name: String,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Table schema
    #[serde(default)]
    pub schema: Schema,

    /// Any other resource attribute (path, format, ...)
    #[serde(flatten)]
    pub extra: Attributes,
}

impl Resource {
    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.schema.fields.iter().find(|f| f.name == name)
    }

    fn check_integrity(&self, package: &Package) -> Result<()> {
        let mut names = HashSet::new();
        for field in &self.schema.fields {
            if !names.insert(field.name.as_str()) {
                return Err(PackageError::DuplicateField {
                    resource: self.name.clone(),
                    field: field.name.clone(),
                });
            }
            if let Some(pattern) = &field.constraints.pattern {
                Regex::new(pattern).map_err(|e| PackageError::InvalidPattern {
                    resource: self.name.clone(),
                    field: field.name.clone(),
                    error: e.to_string(),
                })?;
            }
        }

        if let Some(key) = &self.schema.primary_key {
            self.ensure_fields(key.as_slice())?;
        }

        for foreign_key in &self.schema.foreign_keys {
            self.ensure_fields(foreign_key.fields.as_slice())?;

            let target = if foreign_key.reference.resource.is_empty() {
                self
            } else {
                package
                    .resource(&foreign_key.reference.resource)
                    .ok_or_else(|| PackageError::UnknownReference {
                        resource: self.name.clone(),
                        reference: foreign_key.reference.resource.clone(),
                    })?
            };
            target.ensure_fields(foreign_key.reference.fields.as_slice())?;

            if foreign_key.fields.len() != foreign_key.reference.fields.len() {
                return Err(PackageError::KeyLengthMismatch {
                    resource: self.name.clone(),
                    reference: target.name.clone(),
                });
            }
        }

        Ok(())
    }

    fn ensure_fields(&self, fields: &[String]) -> Result<()> {
        match fields.iter().find(|name| self.field(name).is_none()) {
            Some(missing) => Err(PackageError::UnknownKeyField {
                resource: self.name.clone(),
                field: missing.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// Table schema: the ordered fields of a resource plus its keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Column definitions; order drives column order in generated artifacts
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Fields whose combined values identify a row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<KeyFields>,

    /// References to rows of other (or the same) resources
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,

    /// Cell values read as null
    #[serde(default = "default_missing_values")]
    pub missing_values: Vec<String>,

    /// Any other schema attribute
    #[serde(flatten)]
    pub extra: Attributes,
}

fn default_missing_values() -> Vec<String> {
    vec![String::new()]
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            primary_key: None,
            foreign_keys: Vec::new(),
            missing_values: default_missing_values(),
            extra: Attributes::new(),
        }
    }
}

impl Schema {
    /// Returns true if `value` is one of the schema's missing values.
    pub fn is_missing(&self, value: &str) -> bool {
        self.missing_values.iter().any(|m| m == value)
    }
}

/// A single field (column) definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Column name
    pub name: String,

    /// Logical type of the values
    #[serde(rename = "type", default)]
    pub field_type: FieldType,

    /// Type-specific format (e.g. `%Y-%m-%d` for dates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Human-readable title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Value constraints
    #[serde(default, skip_serializing_if = "Constraints::is_empty")]
    pub constraints: Constraints,

    /// Any other field attribute (example, unit, ...)
    #[serde(flatten)]
    pub extra: Attributes,
}

/// Logical field types.
///
/// Type names not listed here are kept as [`FieldType::Other`] so the
/// declared name survives a round trip; checks treat them like `any`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    /// Free text
    #[default]
    String,
    /// Floating point number
    Number,
    /// Whole number
    Integer,
    /// `true`/`false` (also `TRUE`/`FALSE`/`1`/`0`)
    Boolean,
    /// Calendar date
    Date,
    /// Date and time of day
    Datetime,
    /// Time of day
    Time,
    /// Calendar year
    Year,
    /// Any value
    Any,
    /// Any other type name (`geopoint`, `yearmonth`, `duration`, ...)
    Other(String),
}

impl FieldType {
    /// Returns the Table Schema name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Time => "time",
            FieldType::Year => "year",
            FieldType::Any => "any",
            FieldType::Other(name) => name,
        }
    }
}

impl From<String> for FieldType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => FieldType::String,
            "number" => FieldType::Number,
            "integer" => FieldType::Integer,
            "boolean" => FieldType::Boolean,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "time" => FieldType::Time,
            "year" => FieldType::Year,
            "any" => FieldType::Any,
            _ => FieldType::Other(name),
        }
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Other(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Constraints on the values of a field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Constraints {
    /// Values may not be null
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Non-null values may not repeat
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub unique: bool,

    /// Allowed values
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub allowed: Option<Vec<Value>>,

    /// Inclusive lower bound (number, or date string for date fields)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,

    /// Inclusive upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,

    /// Minimum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum length in characters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Regular expression the whole value must match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl Constraints {
    /// Returns true if no constraint is set.
    pub fn is_empty(&self) -> bool {
        *self == Constraints::default()
    }

    /// Returns the allowed values as text, if an `enum` constraint is set.
    pub fn allowed_text(&self) -> Option<Vec<String>> {
        self.allowed
            .as_ref()
            .map(|values| values.iter().map(value_text).collect())
    }
}

/// Renders a scalar metadata value the way it would appear in a CSV cell.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// One or more field names, written either as a string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyFields {
    /// A single field name
    Single(String),
    /// Several field names
    Multiple(Vec<String>),
}

impl KeyFields {
    /// Returns the field names as a slice.
    pub fn as_slice(&self) -> &[String] {
        match self {
            KeyFields::Single(name) => std::slice::from_ref(name),
            KeyFields::Multiple(names) => names,
        }
    }

    /// Number of fields in the key.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// Returns true if the key has no fields.
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for KeyFields {
    fn from(name: &str) -> Self {
        KeyFields::Single(name.to_string())
    }
}

impl From<Vec<String>> for KeyFields {
    fn from(names: Vec<String>) -> Self {
        KeyFields::Multiple(names)
    }
}

/// A foreign key: local fields referencing fields of a (possibly the same) resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local fields
    pub fields: KeyFields,

    /// Referenced resource and fields
    pub reference: ForeignKeyReference,
}

/// Target of a foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKeyReference {
    /// Referenced resource name; empty means the owning resource
    #[serde(default)]
    pub resource: String,

    /// Referenced fields
    pub fields: KeyFields,
}
