//! Conversion of package metadata into check declarations.

use datapackage_core::{CheckDeclaration, Field, Package, Resource, value_text};
use serde_json::Value;

/// Builds the schema checks for every resource of a package.
///
/// Per resource, in this order: `has_columns`; the field checks in field
/// order; `unique_rows` for the primary key; `in_foreign_table` for each
/// foreign key.
pub fn package_to_checks(package: &Package) -> Vec<CheckDeclaration> {
    package.resources.iter().flat_map(resource_checks).collect()
}

fn resource_checks(resource: &Resource) -> Vec<CheckDeclaration> {
    let table = resource.name.as_str();
    let mut checks = vec![CheckDeclaration::new("has_columns").on_table(table)];

    for field in &resource.schema.fields {
        checks.extend(field_checks(table, field));
    }

    if let Some(key) = &resource.schema.primary_key {
        checks.push(
            CheckDeclaration::new("unique_rows")
                .on_table(table)
                .with_param("columns", key.as_slice().to_vec()),
        );
    }

    for foreign_key in &resource.schema.foreign_keys {
        let reference = if foreign_key.reference.resource.is_empty() {
            table
        } else {
            foreign_key.reference.resource.as_str()
        };
        checks.push(
            CheckDeclaration::new("in_foreign_table")
                .on_table(table)
                .with_param("columns", foreign_key.fields.as_slice().to_vec())
                .with_param("reference", reference)
                .with_param(
                    "reference_columns",
                    foreign_key.reference.fields.as_slice().to_vec(),
                ),
        );
    }

    checks
}

fn field_checks(table: &str, field: &Field) -> Vec<CheckDeclaration> {
    let check = |name: &str| {
        CheckDeclaration::new(name)
            .on_table(table)
            .on_column(&field.name)
    };
    let constraints = &field.constraints;
    let mut checks = vec![check("is_type").with_param("type", field.field_type.as_str())];

    if constraints.required {
        checks.push(check("not_null"));
    }
    if constraints.unique {
        checks.push(check("is_unique"));
    }
    if let Some(allowed) = &constraints.allowed {
        let values: Vec<Value> = allowed.iter().map(|v| Value::String(value_text(v))).collect();
        checks.push(check("in_enum").with_param("values", values));
    }
    if let Some(minimum) = &constraints.minimum {
        checks.push(check("is_minimum").with_param("min", minimum.clone()));
    }
    if let Some(maximum) = &constraints.maximum {
        checks.push(check("is_maximum").with_param("max", maximum.clone()));
    }
    if let Some(length) = constraints.min_length {
        checks.push(check("min_length").with_param("length", length));
    }
    if let Some(length) = constraints.max_length {
        checks.push(check("max_length").with_param("length", length));
    }
    if let Some(pattern) = &constraints.pattern {
        checks.push(check("matches_pattern").with_param("pattern", pattern.as_str()));
    }

    checks
}
