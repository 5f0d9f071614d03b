//! Schema and field declarations.
//!
//! A [`Schema`] is an ordered, immutable list of [`FieldDescriptor`]s. Fields
//! may reference other schemas (nesting) or hold lists of any kind. Shape is
//! fixed once [`Schema::define`] returns; there is no way to add fields later.

use crate::constraint::check_size_bounds;
use crate::{Constraint, Result, SchemaDefinitionError};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Scalar types a field can be coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// 64-bit signed integer
    Integer,
    /// 64-bit floating point number
    Float,
    /// Boolean
    Boolean,
    /// UTF-8 string
    String,
    /// Date and time with a UTC offset
    Timestamp,
    /// Absolute http(s) URL with a host
    Url,
}

impl PrimitiveType {
    /// Returns the canonical name of this type.
    pub fn name(&self) -> &'static str {
        match self {
            PrimitiveType::Integer => "integer",
            PrimitiveType::Float => "float",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::String => "string",
            PrimitiveType::Timestamp => "timestamp",
            PrimitiveType::Url => "url",
        }
    }

    /// Parses a type name, accepting common aliases.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    pub fn from_name(name: &str) -> Option<Self> {
        let primitive = match name.trim().to_lowercase().as_str() {
            "int" | "int32" | "int64" | "integer" | "long" => PrimitiveType::Integer,
            "float" | "float32" | "float64" | "double" | "number" => PrimitiveType::Float,
            "bool" | "boolean" => PrimitiveType::Boolean,
            "str" | "string" | "text" => PrimitiveType::String,
            "timestamp" | "datetime" => PrimitiveType::Timestamp,
            "url" | "http_url" | "httpurl" => PrimitiveType::Url,
            _ => return None,
        };
        Some(primitive)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The declared shape of a field's value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// A scalar value
    Primitive(PrimitiveType),
    /// An object validated against another schema
    Nested(Arc<Schema>),
    /// A list whose elements all share one kind
    List(Box<FieldKind>),
}

impl FieldKind {
    /// Creates a nested kind referencing `schema`.
    pub fn nested(schema: impl Into<Arc<Schema>>) -> Self {
        FieldKind::Nested(schema.into())
    }

    /// Creates a list kind with the given element kind.
    pub fn list(element: FieldKind) -> Self {
        FieldKind::List(Box::new(element))
    }
}

impl From<PrimitiveType> for FieldKind {
    fn from(primitive: PrimitiveType) -> Self {
        FieldKind::Primitive(primitive)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(p) => write!(f, "{}", p),
            FieldKind::Nested(schema) => f.write_str(schema.name()),
            FieldKind::List(element) => write!(f, "list<{}>", element),
        }
    }
}

/// A single field declaration in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field name, unique within its schema
    pub name: String,

    /// Declared kind of the field's value
    pub kind: FieldKind,

    /// Whether the field must be present and non-null
    pub required: bool,

    /// Constraints evaluated against the coerced value
    pub constraints: Vec<Constraint>,

    /// Raw value used when an optional field is absent
    pub default: Option<Value>,

    /// Optional human-readable description
    pub description: Option<String>,
}

impl FieldDescriptor {
    /// Creates a required field with no constraints.
    pub fn new(name: impl Into<String>, kind: impl Into<FieldKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            required: true,
            constraints: Vec::new(),
            default: None,
            description: None,
        }
    }
}

/// An ordered, immutable set of field declarations.
///
/// Schemas are cheap to share behind an [`Arc`] and can be read by any number
/// of concurrent validations without synchronization.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    description: Option<String>,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Defines a schema from an ordered list of fields.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaDefinitionError`] if a field name is empty or
    /// repeated, a constraint does not apply to its field's kind, constraint
    /// bounds are incoherent, or a required field declares a default.
    pub fn define(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Result<Self> {
        let name = name.into();
        let mut seen = HashSet::new();

        for field in &fields {
            if field.name.is_empty() {
                return Err(SchemaDefinitionError::EmptyFieldName {
                    schema: name.clone(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaDefinitionError::DuplicateField {
                    schema: name.clone(),
                    field: field.name.clone(),
                });
            }
            if field.required && field.default.is_some() {
                return Err(SchemaDefinitionError::DefaultOnRequiredField(
                    field.name.clone(),
                ));
            }
            for constraint in &field.constraints {
                if !constraint.applies_to(&field.kind) {
                    return Err(SchemaDefinitionError::incompatible(
                        &field.name,
                        constraint.name(),
                        field.kind.to_string(),
                    ));
                }
                constraint.check_bounds(&field.name)?;
            }
            check_size_bounds(&field.name, &field.constraints)?;
        }

        Ok(Self {
            name,
            description: None,
            fields,
        })
    }

    /// Attaches a description to the schema.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the schema description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Returns true if the schema declares a field called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn string_field(name: &str) -> FieldDescriptor {
        FieldDescriptor::new(name, PrimitiveType::String)
    }

    #[test]
    fn test_define_preserves_order() {
        let schema = Schema::define(
            "Article",
            vec![
                FieldDescriptor::new("id", PrimitiveType::Integer),
                string_field("title"),
                string_field("text"),
            ],
        )
        .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["id", "title", "text"]);
        assert_eq!(schema.len(), 3);
        assert!(schema.has_field("title"));
        assert!(!schema.has_field("missing"));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let err = Schema::define("Article", vec![string_field("title"), string_field("title")])
            .unwrap_err();
        assert_eq!(
            err,
            SchemaDefinitionError::DuplicateField {
                schema: "Article".to_string(),
                field: "title".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = Schema::define("Article", vec![string_field("")]).unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::EmptyFieldName { .. }));
    }

    #[test]
    fn test_incompatible_constraint_rejected() {
        let mut field = FieldDescriptor::new("tags", FieldKind::list(PrimitiveType::String.into()));
        field.constraints.push(Constraint::MaxLength { max: 10 });

        let err = Schema::define("Article", vec![field]).unwrap_err();
        assert_eq!(
            err,
            SchemaDefinitionError::incompatible("tags", "max_length", "list<string>")
        );
    }

    #[test]
    fn test_unsatisfiable_size_bounds_rejected() {
        let mut field = string_field("code");
        field.constraints.push(Constraint::MinLength { min: 10 });
        field.constraints.push(Constraint::MaxLength { max: 5 });

        let err = Schema::define("Voucher", vec![field]).unwrap_err();
        assert!(matches!(
            err,
            SchemaDefinitionError::InvalidBounds { ref constraint, .. } if constraint == "min_length"
        ));
    }

    #[test]
    fn test_default_on_required_rejected() {
        let mut field = string_field("source");
        field.default = Some(Value::from("wire"));

        let err = Schema::define("Article", vec![field]).unwrap_err();
        assert_eq!(
            err,
            SchemaDefinitionError::DefaultOnRequiredField("source".to_string())
        );
    }

    #[test]
    fn test_empty_schema_allowed() {
        let schema = Schema::define("Empty", vec![]).unwrap();
        assert!(schema.is_empty());
    }

    #[test]
    fn test_kind_display() {
        let photo = Schema::define("Photo", vec![]).unwrap();
        let kind = FieldKind::list(FieldKind::nested(photo));
        assert_eq!(kind.to_string(), "list<Photo>");
        assert_eq!(
            FieldKind::list(PrimitiveType::Url.into()).to_string(),
            "list<url>"
        );
    }

    #[test]
    fn test_primitive_aliases() {
        assert_eq!(PrimitiveType::from_name("INT64"), Some(PrimitiveType::Integer));
        assert_eq!(PrimitiveType::from_name(" str "), Some(PrimitiveType::String));
        assert_eq!(PrimitiveType::from_name("datetime"), Some(PrimitiveType::Timestamp));
        assert_eq!(PrimitiveType::from_name("HttpUrl"), Some(PrimitiveType::Url));
        assert_eq!(PrimitiveType::from_name("Photo"), None);
    }
}
