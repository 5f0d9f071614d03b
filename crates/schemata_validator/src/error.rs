//! Failures recorded while validating a record.

use thiserror::Error;

/// A single reason a value failed validation.
///
/// Coercion failures (a string that is not a timestamp, a number that is not
/// an integer) are reported the same way as constraint failures so that a
/// report is uniform. The `Display` output is the human-readable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    /// Required field is absent
    #[error("field required")]
    Missing,

    /// Required field is explicitly null
    #[error("none is not an allowed value")]
    NotNull,

    /// Key not declared by the schema (strict mode only)
    #[error("extra fields not permitted")]
    ExtraField,

    /// Value cannot be coerced to an integer
    #[error("value is not a valid integer")]
    NotInteger,

    /// Value cannot be coerced to a float
    #[error("value is not a valid float")]
    NotFloat,

    /// Value cannot be coerced to a boolean
    #[error("value could not be parsed to a boolean")]
    NotBoolean,

    /// Value cannot be coerced to a string
    #[error("str type expected")]
    NotString,

    /// Value is not a recognizable timestamp
    #[error("invalid datetime format")]
    InvalidTimestamp,

    /// Value is not an acceptable URL
    #[error("{reason}")]
    InvalidUrl {
        /// Why the URL was rejected
        reason: String,
    },

    /// Nested value is not an object
    #[error("value is not a valid dict")]
    NotObject,

    /// Value is not a list
    #[error("value is not a valid list")]
    NotList,

    /// String is longer than allowed
    #[error("ensure this value has at most {max} characters")]
    MaxLength {
        /// Maximum number of characters
        max: usize,
    },

    /// String is shorter than allowed
    #[error("ensure this value has at least {min} characters")]
    MinLength {
        /// Minimum number of characters
        min: usize,
    },

    /// List has too few items
    #[error("ensure this value has at least {min} items")]
    MinItems {
        /// Minimum number of items
        min: usize,
    },

    /// List has too many items
    #[error("ensure this value has at most {max} items")]
    MaxItems {
        /// Maximum number of items
        max: usize,
    },

    /// String does not match the pattern
    #[error("string does not match regex \"{pattern}\"")]
    PatternMismatch {
        /// Source of the pattern
        pattern: String,
    },

    /// Number is below the lower bound
    #[error("ensure this value is greater than or equal to {min}")]
    BelowMinimum {
        /// Lower bound (inclusive)
        min: f64,
    },

    /// Number is above the upper bound
    #[error("ensure this value is less than or equal to {max}")]
    AboveMaximum {
        /// Upper bound (inclusive)
        max: f64,
    },

    /// Value is not one of the permitted values
    #[error("unexpected value; permitted: {}", quoted(.permitted))]
    NotAllowed {
        /// Permitted values
        permitted: Vec<String>,
    },

    /// Constraint was evaluated against a value of the wrong type
    #[error("{constraint} constraint not applicable to {found} value")]
    Inapplicable {
        /// Constraint name
        constraint: &'static str,
        /// Type of the value found
        found: &'static str,
    },
}

impl Violation {
    /// Creates a new invalid URL violation.
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            reason: reason.into(),
        }
    }

    /// Returns the stable name of the check that failed.
    ///
    /// Constraint failures use the constraint's own name; coercion failures
    /// use the name of the target type.
    pub fn constraint(&self) -> &'static str {
        match self {
            Violation::Missing => "missing",
            Violation::NotNull => "not_null",
            Violation::ExtraField => "extra",
            Violation::NotInteger => "integer",
            Violation::NotFloat => "float",
            Violation::NotBoolean => "boolean",
            Violation::NotString => "string",
            Violation::InvalidTimestamp => "timestamp",
            Violation::InvalidUrl { .. } => "url",
            Violation::NotObject => "object",
            Violation::NotList => "list",
            Violation::MaxLength { .. } => "max_length",
            Violation::MinLength { .. } => "min_length",
            Violation::MinItems { .. } => "min_items",
            Violation::MaxItems { .. } => "max_items",
            Violation::PatternMismatch { .. } => "pattern",
            Violation::BelowMinimum { .. } | Violation::AboveMaximum { .. } => "range",
            Violation::NotAllowed { .. } => "allowed_values",
            Violation::Inapplicable { constraint, .. } => *constraint,
        }
    }
}

fn quoted(values: &[String]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v))
        .collect::<Vec<_>>()
        .join(", ")
}
