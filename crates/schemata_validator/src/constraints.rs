//! Constraint evaluation logic.
//!
//! This module evaluates declared constraints against coerced values:
//! - MaxLength / MinLength: character count of strings and URLs
//! - MinItems / MaxItems: number of list elements
//! - Pattern: string must match a regex
//! - Range: number must be within inclusive bounds
//! - AllowedValues: canonical text form must be in a predefined set
//!
//! Evaluation is pure and total. A constraint paired with a value it cannot
//! judge yields [`Violation::Inapplicable`] instead of panicking.

use crate::{FieldValue, Violation};
use schemata_core::Constraint;

/// Evaluates a single constraint against a coerced value.
pub fn evaluate(constraint: &Constraint, value: &FieldValue) -> Result<(), Violation> {
    match constraint {
        Constraint::MaxLength { max } => {
            let len = text_len(constraint, value)?;
            if len > *max {
                return Err(Violation::MaxLength { max: *max });
            }
            Ok(())
        }
        Constraint::MinLength { min } => {
            let len = text_len(constraint, value)?;
            if len < *min {
                return Err(Violation::MinLength { min: *min });
            }
            Ok(())
        }
        Constraint::MinItems { min } => {
            let len = item_count(constraint, value)?;
            if len < *min {
                return Err(Violation::MinItems { min: *min });
            }
            Ok(())
        }
        Constraint::MaxItems { max } => {
            let len = item_count(constraint, value)?;
            if len > *max {
                return Err(Violation::MaxItems { max: *max });
            }
            Ok(())
        }
        Constraint::Pattern { regex } => {
            let text = value
                .as_str()
                .ok_or_else(|| inapplicable(constraint, value))?;
            if !regex.is_match(text) {
                return Err(Violation::PatternMismatch {
                    pattern: regex.as_str().to_string(),
                });
            }
            Ok(())
        }
        Constraint::Range { min, max } => {
            let number = match value {
                FieldValue::Integer(_) | FieldValue::Float(_) => value.as_float(),
                _ => None,
            }
            .ok_or_else(|| inapplicable(constraint, value))?;

            if let Some(min) = min {
                if number < *min {
                    return Err(Violation::BelowMinimum { min: *min });
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Err(Violation::AboveMaximum { max: *max });
                }
            }
            Ok(())
        }
        Constraint::AllowedValues { values } => {
            let text = match value {
                FieldValue::Url(_) | FieldValue::Timestamp(_) => None,
                _ => value.canonical_text(),
            }
            .ok_or_else(|| inapplicable(constraint, value))?;

            if !values.iter().any(|allowed| *allowed == text) {
                return Err(Violation::NotAllowed {
                    permitted: values.clone(),
                });
            }
            Ok(())
        }
    }
}

/// Evaluates every constraint, collecting all failures.
///
/// A failing constraint never prevents the others from being evaluated.
pub fn evaluate_all(constraints: &[Constraint], value: &FieldValue) -> Vec<Violation> {
    constraints
        .iter()
        .filter_map(|constraint| evaluate(constraint, value).err())
        .collect()
}

fn text_len(constraint: &Constraint, value: &FieldValue) -> Result<usize, Violation> {
    match value {
        FieldValue::String(s) => Ok(s.chars().count()),
        FieldValue::Url(url) => Ok(url.as_str().chars().count()),
        _ => Err(inapplicable(constraint, value)),
    }
}

fn item_count(constraint: &Constraint, value: &FieldValue) -> Result<usize, Violation> {
    value
        .as_list()
        .map(<[FieldValue]>::len)
        .ok_or_else(|| inapplicable(constraint, value))
}

fn inapplicable(constraint: &Constraint, value: &FieldValue) -> Violation {
    Violation::Inapplicable {
        constraint: constraint.name(),
        found: value.type_name(),
    }
}
