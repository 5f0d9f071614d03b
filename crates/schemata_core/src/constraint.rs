//! Constraint declarations.
//!
//! A constraint is a named, parameterized predicate attached to a field. This
//! module only declares constraints and checks that they make sense for the
//! field they are attached to; evaluation against values lives in the
//! validator crate.

use crate::{FieldKind, PrimitiveType, Result, SchemaDefinitionError};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Validation constraints that can be applied to a field.
///
/// Length and size bounds are inclusive: a `max_length` of 90 accepts a
/// 90-character string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    /// String must have at most `max` characters
    MaxLength {
        /// Maximum number of characters (inclusive)
        max: usize,
    },

    /// String must have at least `min` characters
    MinLength {
        /// Minimum number of characters (inclusive)
        min: usize,
    },

    /// List must contain at least `min` items
    MinItems {
        /// Minimum number of items (inclusive)
        min: usize,
    },

    /// List must contain at most `max` items
    MaxItems {
        /// Maximum number of items (inclusive)
        max: usize,
    },

    /// String must match the regex pattern
    Pattern {
        /// Compiled regular expression
        regex: Pattern,
    },

    /// Numeric value must be within the specified bounds
    Range {
        /// Minimum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        /// Maximum value (inclusive)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },

    /// Value must be one of the allowed values
    AllowedValues {
        /// List of valid values, in canonical string form
        values: Vec<String>,
    },
}

impl Constraint {
    /// Creates a pattern constraint, compiling the regex.
    pub fn pattern(regex: &str) -> Result<Self> {
        Ok(Self::Pattern {
            regex: Pattern::new(regex)?,
        })
    }

    /// Creates an allowed values constraint.
    pub fn allowed_values<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::AllowedValues {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the stable name of this constraint, as used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::MaxLength { .. } => "max_length",
            Constraint::MinLength { .. } => "min_length",
            Constraint::MinItems { .. } => "min_items",
            Constraint::MaxItems { .. } => "max_items",
            Constraint::Pattern { .. } => "pattern",
            Constraint::Range { .. } => "range",
            Constraint::AllowedValues { .. } => "allowed_values",
        }
    }

    /// Returns true if this constraint can be evaluated on values of `kind`.
    pub fn applies_to(&self, kind: &FieldKind) -> bool {
        let primitive = match kind {
            FieldKind::Primitive(p) => Some(*p),
            _ => None,
        };

        match self {
            Constraint::MaxLength { .. } | Constraint::MinLength { .. } => matches!(
                primitive,
                Some(PrimitiveType::String | PrimitiveType::Url)
            ),
            Constraint::MinItems { .. } | Constraint::MaxItems { .. } => {
                matches!(kind, FieldKind::List(_))
            }
            Constraint::Pattern { .. } => primitive == Some(PrimitiveType::String),
            Constraint::Range { .. } => matches!(
                primitive,
                Some(PrimitiveType::Integer | PrimitiveType::Float)
            ),
            Constraint::AllowedValues { .. } => matches!(
                primitive,
                Some(
                    PrimitiveType::String
                        | PrimitiveType::Integer
                        | PrimitiveType::Float
                        | PrimitiveType::Boolean
                )
            ),
        }
    }

    /// Checks that the constraint parameters are coherent.
    pub(crate) fn check_bounds(&self, field: &str) -> Result<()> {
        match self {
            Constraint::Range { min, max } => {
                if min.is_none() && max.is_none() {
                    return Err(SchemaDefinitionError::invalid_bounds(
                        field,
                        self.name(),
                        "at least one of min or max is required",
                    ));
                }
                if min.is_some_and(|m| !m.is_finite()) || max.is_some_and(|m| !m.is_finite()) {
                    return Err(SchemaDefinitionError::invalid_bounds(
                        field,
                        self.name(),
                        "bounds must be finite numbers",
                    ));
                }
                if let (Some(min), Some(max)) = (min, max) {
                    if min > max {
                        return Err(SchemaDefinitionError::invalid_bounds(
                            field,
                            self.name(),
                            format!("min {} is greater than max {}", min, max),
                        ));
                    }
                }
                Ok(())
            }
            Constraint::AllowedValues { values } if values.is_empty() => {
                Err(SchemaDefinitionError::invalid_bounds(
                    field,
                    self.name(),
                    "at least one allowed value is required",
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Checks that lower and upper size bounds declared on one field overlap.
pub(crate) fn check_size_bounds(field: &str, constraints: &[Constraint]) -> Result<()> {
    let min_length = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::MinLength { min } => Some(*min),
            _ => None,
        })
        .max();
    let max_length = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::MaxLength { max } => Some(*max),
            _ => None,
        })
        .min();
    if let (Some(min), Some(max)) = (min_length, max_length) {
        if min > max {
            return Err(SchemaDefinitionError::invalid_bounds(
                field,
                "min_length",
                format!("min_length {} is greater than max_length {}", min, max),
            ));
        }
    }

    let min_items = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::MinItems { min } => Some(*min),
            _ => None,
        })
        .max();
    let max_items = constraints
        .iter()
        .filter_map(|c| match c {
            Constraint::MaxItems { max } => Some(*max),
            _ => None,
        })
        .min();
    if let (Some(min), Some(max)) = (min_items, max_items) {
        if min > max {
            return Err(SchemaDefinitionError::invalid_bounds(
                field,
                "min_items",
                format!("min_items {} is greater than max_items {}", min, max),
            ));
        }
    }

    Ok(())
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MaxLength { max } => write!(f, "max_length({})", max),
            Constraint::MinLength { min } => write!(f, "min_length({})", min),
            Constraint::MinItems { min } => write!(f, "min_items({})", min),
            Constraint::MaxItems { max } => write!(f, "max_items({})", max),
            Constraint::Pattern { regex } => write!(f, "pattern({})", regex.as_str()),
            Constraint::Range { min, max } => {
                let bound = |b: &Option<f64>| b.map(|v| v.to_string()).unwrap_or_default();
                write!(f, "range({}..={})", bound(min), bound(max))
            }
            Constraint::AllowedValues { values } => {
                write!(f, "allowed_values({})", values.join(", "))
            }
        }
    }
}

/// A regular expression compiled at definition time.
///
/// Serialized as its source text; deserializing compiles it, so a malformed
/// pattern never reaches validation.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    /// Compiles a new pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        Regex::new(pattern)
            .map(Self)
            .map_err(|e| SchemaDefinitionError::InvalidPattern {
                pattern: pattern.to_string(),
                error: e.to_string(),
            })
    }

    /// Returns the source text of the pattern.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns true if the pattern matches anywhere in `value`.
    pub fn is_match(&self, value: &str) -> bool {
        self.0.is_match(value)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.as_str()).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Pattern::new(&source).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_names() {
        assert_eq!(Constraint::MaxLength { max: 90 }.name(), "max_length");
        assert_eq!(Constraint::MinItems { min: 1 }.name(), "min_items");
        assert_eq!(Constraint::allowed_values(["a"]).name(), "allowed_values");
    }

    #[test]
    fn test_applies_to() {
        let string = FieldKind::Primitive(PrimitiveType::String);
        let int = FieldKind::Primitive(PrimitiveType::Integer);
        let list = FieldKind::list(FieldKind::Primitive(PrimitiveType::String));

        assert!(Constraint::MaxLength { max: 3 }.applies_to(&string));
        assert!(!Constraint::MaxLength { max: 3 }.applies_to(&list));
        assert!(Constraint::MinItems { min: 1 }.applies_to(&list));
        assert!(!Constraint::MinItems { min: 1 }.applies_to(&string));
        assert!(
            Constraint::Range {
                min: Some(0.0),
                max: None
            }
            .applies_to(&int)
        );
        assert!(!Constraint::pattern("^a").unwrap().applies_to(&int));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = Constraint::pattern("[invalid(regex").unwrap_err();
        assert!(matches!(err, SchemaDefinitionError::InvalidPattern { .. }));
    }

    #[test]
    fn test_range_bounds() {
        let inverted = Constraint::Range {
            min: Some(10.0),
            max: Some(1.0),
        };
        assert!(matches!(
            inverted.check_bounds("age"),
            Err(SchemaDefinitionError::InvalidBounds { .. })
        ));

        let open = Constraint::Range {
            min: None,
            max: None,
        };
        assert!(open.check_bounds("age").is_err());

        let ok = Constraint::Range {
            min: Some(0.0),
            max: Some(0.0),
        };
        assert!(ok.check_bounds("age").is_ok());
    }

    #[test]
    fn test_size_bounds_must_overlap() {
        let inverted_length = [
            Constraint::MaxLength { max: 3 },
            Constraint::MinLength { min: 5 },
        ];
        assert!(matches!(
            check_size_bounds("slug", &inverted_length),
            Err(SchemaDefinitionError::InvalidBounds { .. })
        ));

        let inverted_items = [
            Constraint::MinItems { min: 4 },
            Constraint::MaxItems { max: 2 },
        ];
        assert!(matches!(
            check_size_bounds("tags", &inverted_items),
            Err(SchemaDefinitionError::InvalidBounds { .. })
        ));

        let exact = [
            Constraint::MinLength { min: 4 },
            Constraint::MaxLength { max: 4 },
        ];
        assert!(check_size_bounds("code", &exact).is_ok());
    }

    #[test]
    fn test_deserialize_tagged() {
        let json = r#"[
            {"type": "max_length", "max": 90},
            {"type": "pattern", "regex": "^[a-z]+$"},
            {"type": "range", "min": 0}
        ]"#;
        let constraints: Vec<Constraint> = serde_json::from_str(json).unwrap();

        assert_eq!(constraints[0], Constraint::MaxLength { max: 90 });
        assert_eq!(constraints[1], Constraint::pattern("^[a-z]+$").unwrap());
        assert_eq!(
            constraints[2],
            Constraint::Range {
                min: Some(0.0),
                max: None
            }
        );
    }

    #[test]
    fn test_deserialize_rejects_bad_regex() {
        let json = r#"{"type": "pattern", "regex": "(unclosed"}"#;
        assert!(serde_json::from_str::<Constraint>(json).is_err());
    }
}
