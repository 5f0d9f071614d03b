//! Main validation engine.
//!
//! This module provides the [`Validator`] that walks a raw JSON mapping
//! against a schema, coercing each field, evaluating its constraints, and
//! recursing into nested schemas and lists. Failures are collected rather
//! than short-circuited: one call reports every problem in the input.

use crate::{
    FieldValue, ReportEntry, ValidatedObject, ValidationReport, Violation, coerce, constraints,
};
use schemata_core::{FieldDescriptor, FieldKind, FieldPath, Schema, ValidationContext};
use serde_json::{Map, Value};
use tracing::{debug, trace};

/// Validation engine for schemas.
///
/// A validator holds only its options, so one instance can serve any number
/// of concurrent validations against shared schemas.
///
/// # Example
///
/// ```rust
/// use schemata_core::{FieldBuilder, SchemaBuilder};
/// use schemata_validator::Validator;
/// use serde_json::json;
///
/// let schema = SchemaBuilder::new("Photo")
///     .field(FieldBuilder::string("caption").optional().build())
///     .field(FieldBuilder::url("url").build())
///     .build()
///     .unwrap();
///
/// let validator = Validator::new();
/// match validator.validate_value(&schema, &json!({"url": "https://example.com/a.jpg"})) {
///     Ok(photo) => assert!(photo.get("caption").unwrap().is_empty()),
///     Err(report) => panic!("unexpected failures: {}", report),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    context: ValidationContext,
}

impl Validator {
    /// Creates a validator with the default context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validator with the given context.
    pub fn with_context(context: ValidationContext) -> Self {
        Self { context }
    }

    /// Returns the validation context.
    pub fn context(&self) -> &ValidationContext {
        &self.context
    }

    /// Validates a raw mapping against a schema.
    ///
    /// Returns the validated object when every field passes, otherwise a
    /// report listing every failure. Never returns a partially valid object.
    pub fn validate(
        &self,
        schema: &Schema,
        raw: &Map<String, Value>,
    ) -> Result<ValidatedObject, ValidationReport> {
        debug!(
            schema = schema.name(),
            fields = schema.len(),
            keys = raw.len(),
            "Validating record"
        );

        let mut entries = Vec::new();
        let object = self.validate_object(schema, raw, &FieldPath::root(), &mut entries);
        finish(schema, object, entries)
    }

    /// Validates any JSON value against a schema.
    ///
    /// A value that is not an object is reported at the root path.
    pub fn validate_value(
        &self,
        schema: &Schema,
        raw: &Value,
    ) -> Result<ValidatedObject, ValidationReport> {
        match raw.as_object() {
            Some(map) => self.validate(schema, map),
            None => Err(ValidationReport::new(
                schema.name(),
                vec![ReportEntry::new(FieldPath::root(), Violation::NotObject)],
            )),
        }
    }

    /// Validates a batch of records against the same schema.
    ///
    /// Paths in the report are prefixed with the record index (`[2].title`).
    /// The batch succeeds only if every record does.
    pub fn validate_many(
        &self,
        schema: &Schema,
        records: &[Value],
    ) -> Result<Vec<ValidatedObject>, ValidationReport> {
        debug!(
            schema = schema.name(),
            records = records.len(),
            "Validating batch"
        );

        let mut entries = Vec::new();
        let mut objects = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let path = FieldPath::root().index(index);
            match record.as_object() {
                Some(map) => objects.push(self.validate_object(schema, map, &path, &mut entries)),
                None => entries.push(ReportEntry::new(path, Violation::NotObject)),
            }
        }

        if entries.is_empty() {
            Ok(objects)
        } else {
            debug!(
                schema = schema.name(),
                errors = entries.len(),
                "Batch validation failed"
            );
            Err(ValidationReport::new(schema.name(), entries))
        }
    }

    /// Walks every field of `schema`, recording failures in `entries`.
    ///
    /// Always returns an object; callers must discard it if `entries` grew.
    fn validate_object(
        &self,
        schema: &Schema,
        raw: &Map<String, Value>,
        path: &FieldPath,
        entries: &mut Vec<ReportEntry>,
    ) -> ValidatedObject {
        let fields = schema
            .fields()
            .iter()
            .map(|field| {
                let field_path = path.field(&field.name);
                let value = self.resolve_field(field, raw.get(&field.name), &field_path, entries);
                (field.name.clone(), value)
            })
            .collect();

        if self.context.strict {
            for key in raw.keys().filter(|key| !schema.has_field(key)) {
                entries.push(ReportEntry::new(path.field(key), Violation::ExtraField));
            }
        }

        ValidatedObject::new(schema.name(), fields)
    }

    fn resolve_field(
        &self,
        field: &FieldDescriptor,
        raw: Option<&Value>,
        path: &FieldPath,
        entries: &mut Vec<ReportEntry>,
    ) -> FieldValue {
        trace!(field = %path, kind = %field.kind, present = raw.is_some(), "Resolving field");

        match raw {
            None | Some(Value::Null) if !field.required => match (raw, &field.default) {
                (None, Some(default)) => self.coerce_and_check(field, default, path, entries),
                _ => FieldValue::Empty,
            },
            None => {
                entries.push(ReportEntry::new(path.clone(), Violation::Missing));
                FieldValue::Empty
            }
            Some(Value::Null) => {
                entries.push(ReportEntry::new(path.clone(), Violation::NotNull));
                FieldValue::Empty
            }
            Some(value) => self.coerce_and_check(field, value, path, entries),
        }
    }

    fn coerce_and_check(
        &self,
        field: &FieldDescriptor,
        raw: &Value,
        path: &FieldPath,
        entries: &mut Vec<ReportEntry>,
    ) -> FieldValue {
        match self.coerce(&field.kind, raw, path, entries) {
            Some(value) => {
                for violation in constraints::evaluate_all(&field.constraints, &value) {
                    entries.push(ReportEntry::new(path.clone(), violation));
                }
                value
            }
            None => FieldValue::Empty,
        }
    }

    /// Coerces `raw` to `kind`, returning `None` if the value could not be
    /// given a shape at all (constraints are then skipped).
    fn coerce(
        &self,
        kind: &FieldKind,
        raw: &Value,
        path: &FieldPath,
        entries: &mut Vec<ReportEntry>,
    ) -> Option<FieldValue> {
        match kind {
            FieldKind::Primitive(primitive) => match coerce::coerce_primitive(*primitive, raw) {
                Ok(value) => Some(value),
                Err(violation) => {
                    entries.push(ReportEntry::new(path.clone(), violation));
                    None
                }
            },
            FieldKind::Nested(schema) => match raw.as_object() {
                Some(map) => Some(FieldValue::Object(
                    self.validate_object(schema, map, path, entries),
                )),
                None => {
                    entries.push(ReportEntry::new(path.clone(), Violation::NotObject));
                    None
                }
            },
            FieldKind::List(element) => match raw.as_array() {
                Some(items) => {
                    let values = items
                        .iter()
                        .enumerate()
                        .map(|(index, item)| {
                            let item_path = path.index(index);
                            if item.is_null() {
                                entries.push(ReportEntry::new(item_path, Violation::NotNull));
                                return FieldValue::Empty;
                            }
                            // Failed elements keep their slot so list size
                            // constraints see the input's real length.
                            self.coerce(element, item, &item_path, entries)
                                .unwrap_or(FieldValue::Empty)
                        })
                        .collect();
                    Some(FieldValue::List(values))
                }
                None => {
                    entries.push(ReportEntry::new(path.clone(), Violation::NotList));
                    None
                }
            },
        }
    }
}

fn finish(
    schema: &Schema,
    object: ValidatedObject,
    entries: Vec<ReportEntry>,
) -> Result<ValidatedObject, ValidationReport> {
    if entries.is_empty() {
        debug!(schema = schema.name(), "Validation passed");
        Ok(object)
    } else {
        debug!(
            schema = schema.name(),
            errors = entries.len(),
            "Validation failed"
        );
        Err(ValidationReport::new(schema.name(), entries))
    }
}

/// Validates a raw mapping with the default context.
///
/// Shorthand for `Validator::new().validate(schema, raw)`.
pub fn validate(
    schema: &Schema,
    raw: &Map<String, Value>,
) -> Result<ValidatedObject, ValidationReport> {
    Validator::new().validate(schema, raw)
}
