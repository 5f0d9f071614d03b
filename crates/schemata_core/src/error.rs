//! Error types for schema definitions.
//!
//! A schema either is well-formed or does not exist: every problem found while
//! declaring one is reported through [`SchemaDefinitionError`] at definition
//! time, never during validation.

use thiserror::Error;

/// Result type for schema definition operations.
pub type Result<T> = std::result::Result<T, SchemaDefinitionError>;

/// Errors raised while defining a schema.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaDefinitionError {
    /// A field was declared with an empty name
    #[error("Schema '{schema}' declares a field with an empty name")]
    EmptyFieldName {
        /// Schema being defined
        schema: String,
    },

    /// Two fields share a name
    #[error("Duplicate field name '{field}' in schema '{schema}'")]
    DuplicateField {
        /// Schema being defined
        schema: String,
        /// Repeated field name
        field: String,
    },

    /// Constraint cannot apply to the field's declared kind
    #[error("Constraint '{constraint}' cannot be applied to field '{field}' of kind {kind}")]
    IncompatibleConstraint {
        /// Field name
        field: String,
        /// Constraint name
        constraint: String,
        /// Declared kind of the field
        kind: String,
    },

    /// Constraint bounds are missing or inverted
    #[error("Invalid bounds for constraint '{constraint}' on field '{field}': {message}")]
    InvalidBounds {
        /// Field name
        field: String,
        /// Constraint name
        constraint: String,
        /// What is wrong with the bounds
        message: String,
    },

    /// A default value was declared on a required field
    #[error("Field '{0}' is required and cannot declare a default value")]
    DefaultOnRequiredField(String),

    /// Regex pattern failed to compile
    #[error("Invalid regex pattern '{pattern}': {error}")]
    InvalidPattern {
        /// Offending pattern
        pattern: String,
        /// Compiler message
        error: String,
    },
}

impl SchemaDefinitionError {
    /// Creates a new incompatible constraint error.
    pub fn incompatible(
        field: impl Into<String>,
        constraint: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self::IncompatibleConstraint {
            field: field.into(),
            constraint: constraint.into(),
            kind: kind.into(),
        }
    }

    /// Creates a new invalid bounds error.
    pub fn invalid_bounds(
        field: impl Into<String>,
        constraint: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidBounds {
            field: field.into(),
            constraint: constraint.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SchemaDefinitionError::DuplicateField {
            schema: "Article".to_string(),
            field: "title".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Duplicate field name 'title' in schema 'Article'"
        );

        let err = SchemaDefinitionError::incompatible("tags", "max_length", "list<string>");
        assert_eq!(
            err.to_string(),
            "Constraint 'max_length' cannot be applied to field 'tags' of kind list<string>"
        );
    }
}
