//! Builder pattern for declaring schemas.
//!
//! This module provides ergonomic builders for constructing schemas and their
//! fields with a fluent API.

use crate::{Constraint, FieldDescriptor, FieldKind, PrimitiveType, Result, Schema};
use serde_json::Value;
use std::sync::Arc;

/// Builder for creating a [`Schema`].
///
/// # Example
///
/// ```rust
/// use schemata_core::{FieldBuilder, SchemaBuilder};
///
/// let photo = SchemaBuilder::new("Photo")
///     .field(FieldBuilder::string("caption").optional().build())
///     .field(FieldBuilder::url("url").build())
///     .build()
///     .expect("valid schema");
///
/// assert_eq!(photo.len(), 2);
/// ```
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl SchemaBuilder {
    /// Creates a new schema builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            fields: Vec::new(),
        }
    }

    /// Sets the schema description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds a field to the schema.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Adds multiple fields to the schema.
    pub fn fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Builds the schema, running all definition-time checks.
    pub fn build(self) -> Result<Schema> {
        let schema = Schema::define(self.name, self.fields)?;
        Ok(match self.description {
            Some(description) => schema.with_description(description),
            None => schema,
        })
    }
}

/// Builder for creating a [`FieldDescriptor`].
///
/// Fields are required unless [`optional`](FieldBuilder::optional) is called.
///
/// # Example
///
/// ```rust
/// use schemata_core::FieldBuilder;
///
/// let title = FieldBuilder::string("title")
///     .description("Headline shown on the front page")
///     .max_length(90)
///     .build();
///
/// assert!(title.required);
/// assert_eq!(title.constraints.len(), 1);
/// ```
#[derive(Debug)]
pub struct FieldBuilder {
    field: FieldDescriptor,
}

impl FieldBuilder {
    /// Creates a new required field builder.
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            field: FieldDescriptor::new(name, kind),
        }
    }

    /// Creates a string field builder.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::String)
    }

    /// Creates an integer field builder.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::Integer)
    }

    /// Creates a float field builder.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::Float)
    }

    /// Creates a boolean field builder.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::Boolean)
    }

    /// Creates a timestamp field builder.
    pub fn timestamp(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::Timestamp)
    }

    /// Creates a URL field builder.
    pub fn url(name: impl Into<String>) -> Self {
        Self::new(name, PrimitiveType::Url)
    }

    /// Creates a field builder for an object validated against `schema`.
    pub fn nested(name: impl Into<String>, schema: impl Into<Arc<Schema>>) -> Self {
        Self::new(name, FieldKind::nested(schema))
    }

    /// Creates a list field builder with the given element kind.
    pub fn list(name: impl Into<String>, element: impl Into<FieldKind>) -> Self {
        Self::new(name, FieldKind::list(element.into()))
    }

    /// Sets whether the field is required.
    pub fn required(mut self, required: bool) -> Self {
        self.field.required = required;
        self
    }

    /// Marks the field as optional.
    pub fn optional(self) -> Self {
        self.required(false)
    }

    /// Sets the field description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.field.description = Some(description.into());
        self
    }

    /// Sets the raw default used when the field is absent.
    ///
    /// Only meaningful on optional fields.
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.field.default = Some(value.into());
        self
    }

    /// Adds a constraint to the field.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.field.constraints.push(constraint);
        self
    }

    /// Adds a maximum length constraint.
    pub fn max_length(self, max: usize) -> Self {
        self.constraint(Constraint::MaxLength { max })
    }

    /// Adds a minimum length constraint.
    pub fn min_length(self, min: usize) -> Self {
        self.constraint(Constraint::MinLength { min })
    }

    /// Adds a minimum list size constraint.
    pub fn min_items(self, min: usize) -> Self {
        self.constraint(Constraint::MinItems { min })
    }

    /// Adds a maximum list size constraint.
    pub fn max_items(self, max: usize) -> Self {
        self.constraint(Constraint::MaxItems { max })
    }

    /// Adds an inclusive numeric range constraint.
    pub fn range(self, min: Option<f64>, max: Option<f64>) -> Self {
        self.constraint(Constraint::Range { min, max })
    }

    /// Builds the field.
    pub fn build(self) -> FieldDescriptor {
        self.field
    }
}

impl From<FieldBuilder> for FieldDescriptor {
    fn from(builder: FieldBuilder) -> Self {
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemaDefinitionError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_schema_builder_minimal() {
        let schema = SchemaBuilder::new("Photo").build().unwrap();

        assert_eq!(schema.name(), "Photo");
        assert!(schema.description().is_none());
        assert!(schema.is_empty());
    }

    #[test]
    fn test_schema_builder_full() {
        let photo = SchemaBuilder::new("Photo")
            .field(FieldBuilder::string("caption").optional().build())
            .field(FieldBuilder::url("url").build())
            .build()
            .unwrap();

        let article = SchemaBuilder::new("Article")
            .description("News article")
            .field(FieldBuilder::integer("id").build())
            .field(FieldBuilder::string("title").max_length(90).build())
            .field(FieldBuilder::list("photos", FieldKind::nested(photo)).optional().build())
            .build()
            .unwrap();

        assert_eq!(article.description(), Some("News article"));
        assert_eq!(article.len(), 3);
        let photos = article.field("photos").unwrap();
        assert!(!photos.required);
        assert_eq!(photos.kind.to_string(), "list<Photo>");
    }

    #[test]
    fn test_schema_builder_multiple_fields() {
        let schema = SchemaBuilder::new("Tagged")
            .fields(vec![
                FieldBuilder::string("id").build(),
                FieldBuilder::list("tags", PrimitiveType::String).build(),
            ])
            .build()
            .unwrap();

        assert_eq!(schema.fields()[0].name, "id");
        assert_eq!(schema.fields()[1].name, "tags");
    }

    #[test]
    fn test_field_builder_minimal() {
        let field = FieldBuilder::string("source").build();

        assert_eq!(field.name, "source");
        assert!(field.required); // Default is required
        assert!(field.default.is_none());
        assert!(field.description.is_none());
        assert!(field.constraints.is_empty());
    }

    #[test]
    fn test_field_builder_multiple_constraints() {
        let field = FieldBuilder::string("slug")
            .min_length(3)
            .max_length(40)
            .constraint(Constraint::pattern("^[a-z-]+$").unwrap())
            .build();

        let names: Vec<&str> = field.constraints.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["min_length", "max_length", "pattern"]);
    }

    #[test]
    fn test_field_builder_default() {
        let field = FieldBuilder::integer("priority").optional().default(3).build();
        assert_eq!(field.default, Some(Value::from(3)));
    }

    #[test]
    fn test_build_reports_definition_errors() {
        let err = SchemaBuilder::new("Article")
            .field(FieldBuilder::integer("id").max_length(3).build())
            .build()
            .unwrap_err();

        assert!(matches!(
            err,
            SchemaDefinitionError::IncompatibleConstraint { .. }
        ));
    }
}
