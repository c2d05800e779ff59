//! Builder pattern for creating data packages.
//!
//! This module provides ergonomic builders for constructing packages,
//! resources and fields with a fluent API.

use crate::{
    Attributes, Constraints, Field, FieldType, ForeignKey, ForeignKeyReference, KeyFields,
    Package, Resource, Schema,
};
use serde_json::Value;

/// Builder for creating a `Package`.
///
/// # Example
///
/// ```rust
/// use datapackage_core::{PackageBuilder, ResourceBuilder};
///
/// let package = PackageBuilder::new()
///     .name("boreholes")
///     .title("Borehole temperatures")
///     .resource(ResourceBuilder::new("borehole").build())
///     .build();
///
/// assert_eq!(package.name.as_deref(), Some("boreholes"));
/// ```
#[derive(Debug, Default)]
pub struct PackageBuilder {
    name: Option<String>,
    title: Option<String>,
    description: Option<String>,
    resources: Vec<Resource>,
    extra: Attributes,
}

impl PackageBuilder {
    /// Creates an empty package builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the package name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the package title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the package description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a resource.
    pub fn resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Sets an arbitrary package attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the package.
    pub fn build(self) -> Package {
        Package {
            name: self.name,
            title: self.title,
            description: self.description,
            resources: self.resources,
            extra: self.extra,
        }
    }
}

/// Builder for creating a `Resource`.
#[derive(Debug)]
pub struct ResourceBuilder {
    name: String,
    title: Option<String>,
    description: Option<String>,
    schema: Schema,
    extra: Attributes,
}

impl ResourceBuilder {
    /// Creates a new resource builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            schema: Schema::default(),
            extra: Attributes::new(),
        }
    }

    /// Sets the resource title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the resource description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: Field) -> Self {
        self.schema.fields.push(field);
        self
    }

    /// Adds multiple fields to the schema.
    pub fn fields(mut self, fields: Vec<Field>) -> Self {
        self.schema.fields.extend(fields);
        self
    }

    /// Sets the primary key.
    pub fn primary_key(mut self, key: impl Into<KeyFields>) -> Self {
        self.schema.primary_key = Some(key.into());
        self
    }

    /// Adds a foreign key.
    pub fn foreign_key(
        mut self,
        fields: impl Into<KeyFields>,
        resource: impl Into<String>,
        reference_fields: impl Into<KeyFields>,
    ) -> Self {
        self.schema.foreign_keys.push(ForeignKey {
            fields: fields.into(),
            reference: ForeignKeyReference {
                resource: resource.into(),
                fields: reference_fields.into(),
            },
        });
        self
    }

    /// Replaces the missing values of the schema.
    pub fn missing_values(mut self, values: &[&str]) -> Self {
        self.schema.missing_values = values.iter().map(|v| v.to_string()).collect();
        self
    }

    /// Sets an arbitrary resource attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the resource.
    pub fn build(self) -> Resource {
        Resource {
            name: self.name,
            title: self.title,
            description: self.description,
            schema: self.schema,
            extra: self.extra,
        }
    }
}

/// Builder for creating a `Field`.
///
/// # Example
///
/// ```rust
/// use datapackage_core::{FieldBuilder, FieldType};
///
/// let field = FieldBuilder::new("id", FieldType::Integer)
///     .description("Unique borehole identifier")
///     .required()
///     .unique()
///     .build();
///
/// assert!(field.constraints.required);
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    name: String,
    field_type: FieldType,
    format: Option<String>,
    title: Option<String>,
    description: Option<String>,
    constraints: Constraints,
    extra: Attributes,
}

impl FieldBuilder {
    /// Creates a new field builder.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            format: None,
            title: None,
            description: None,
            constraints: Constraints::default(),
            extra: Attributes::new(),
        }
    }

    /// Sets the type-specific format.
    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Sets the field title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the field as required.
    pub fn required(mut self) -> Self {
        self.constraints.required = true;
        self
    }

    /// Marks the field as unique.
    pub fn unique(mut self) -> Self {
        self.constraints.unique = true;
        self
    }

    /// Restricts the field to a list of allowed values.
    pub fn allowed_values<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraints.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the inclusive minimum.
    pub fn minimum(mut self, minimum: impl Into<Value>) -> Self {
        self.constraints.minimum = Some(minimum.into());
        self
    }

    /// Sets the inclusive maximum.
    pub fn maximum(mut self, maximum: impl Into<Value>) -> Self {
        self.constraints.maximum = Some(maximum.into());
        self
    }

    /// Sets the minimum length.
    pub fn min_length(mut self, length: usize) -> Self {
        self.constraints.min_length = Some(length);
        self
    }

    /// Sets the maximum length.
    pub fn max_length(mut self, length: usize) -> Self {
        self.constraints.max_length = Some(length);
        self
    }

    /// Sets the pattern constraint.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    /// Sets an arbitrary field attribute.
    pub fn attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Builds the field.
    pub fn build(self) -> Field {
        Field {
            name: self.name,
            field_type: self.field_type,
            format: self.format,
            title: self.title,
            description: self.description,
            constraints: self.constraints,
            extra: self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_package_builder_minimal() {
        let package = PackageBuilder::new().build();

        assert_eq!(package.name, None);
        assert!(package.resources.is_empty());
        assert!(package.extra.is_empty());
    }

    #[test]
    fn test_package_builder_full() {
        let package = PackageBuilder::new()
            .name("boreholes")
            .title("Boreholes")
            .description("Borehole temperature measurements")
            .attribute("version", "1.0.0")
            .resource(ResourceBuilder::new("borehole").build())
            .resource(ResourceBuilder::new("measurement").build())
            .build();

        assert_eq!(package.title.as_deref(), Some("Boreholes"));
        assert_eq!(package.resource_names(), vec!["borehole", "measurement"]);
        assert_eq!(package.extra.get("version"), Some(&Value::from("1.0.0")));
    }

    #[test]
    fn test_resource_builder_keys() {
        let resource = ResourceBuilder::new("measurement")
            .field(FieldBuilder::new("borehole_id", FieldType::Integer).build())
            .field(FieldBuilder::new("depth", FieldType::Number).build())
            .primary_key(vec!["borehole_id".to_string(), "depth".to_string()])
            .foreign_key("borehole_id", "borehole", "id")
            .missing_values(&["", "NA"])
            .build();

        assert_eq!(resource.schema.fields.len(), 2);
        assert_eq!(resource.schema.primary_key.as_ref().map(KeyFields::len), Some(2));
        assert_eq!(resource.schema.foreign_keys[0].reference.resource, "borehole");
        assert_eq!(resource.schema.missing_values, vec!["", "NA"]);
    }

    #[test]
    fn test_field_builder_minimal() {
        let field = FieldBuilder::new("notes", FieldType::String).build();

        assert_eq!(field.name, "notes");
        assert_eq!(field.field_type, FieldType::String);
        assert!(field.constraints.is_empty());
    }

    #[test]
    fn test_field_builder_constraints() {
        let field = FieldBuilder::new("depth", FieldType::Number)
            .title("Depth")
            .description("Depth below surface")
            .required()
            .minimum(0)
            .maximum(1000.5)
            .attribute("unit", "m")
            .build();

        assert!(field.constraints.required);
        assert!(!field.constraints.unique);
        assert_eq!(field.constraints.minimum, Some(Value::from(0)));
        assert_eq!(field.constraints.maximum, Some(Value::from(1000.5)));
        assert_eq!(field.extra.get("unit"), Some(&Value::from("m")));
    }

    #[test]
    fn test_field_builder_enum_and_text() {
        let field = FieldBuilder::new("method", FieldType::String)
            .allowed_values(["probe", "logger"])
            .min_length(2)
            .max_length(10)
            .pattern("^[a-z]+$")
            .build();

        assert_eq!(
            field.constraints.allowed_text(),
            Some(vec!["probe".to_string(), "logger".to_string()])
        );
        assert_eq!(field.constraints.min_length, Some(2));
        assert_eq!(field.constraints.max_length, Some(10));
    }
}
