//! Resolution of a [`SchemaDocument`] into linked schemas.

use crate::{FieldEntry, ParserError, Result, SchemaDocument, SchemaEntry};
use schemata_core::{FieldDescriptor, FieldKind, PrimitiveType, Schema};
use std::collections::HashMap;
use std::sync::Arc;

/// Prefixes accepted for list type expressions, compared case-insensitively.
const LIST_PREFIXES: &[&str] = &["list<", "array<"];

/// A set of schemas loaded from one document.
///
/// Schemas referencing each other share the same `Arc`, so a nested schema is
/// defined once no matter how many fields use it.
#[derive(Debug, Clone, Default)]
pub struct SchemaSet {
    schemas: Vec<Arc<Schema>>,
}

impl SchemaSet {
    /// Resolves every schema in `document`.
    ///
    /// Field types may name schemas declared later in the document. Reference
    /// cycles are rejected.
    pub fn from_document(document: &SchemaDocument) -> Result<Self> {
        let mut entries: HashMap<&str, &SchemaEntry> = HashMap::new();
        for entry in &document.schemas {
            if entries.insert(entry.name.as_str(), entry).is_some() {
                return Err(ParserError::DuplicateSchema(entry.name.clone()));
            }
        }

        let mut resolver = Resolver {
            entries,
            resolved: HashMap::new(),
            stack: Vec::new(),
        };

        let schemas = document
            .schemas
            .iter()
            .map(|entry| resolver.schema(&entry.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { schemas })
    }

    /// Gets a schema by name.
    pub fn get(&self, name: &str) -> Option<Arc<Schema>> {
        self.schemas
            .iter()
            .find(|schema| schema.name() == name)
            .cloned()
    }

    /// Returns the schema names in declaration order.
    pub fn names(&self) -> Vec<&str> {
        self.schemas.iter().map(|schema| schema.name()).collect()
    }

    /// Returns an iterator over the schemas in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Schema>> {
        self.schemas.iter()
    }

    /// Returns the number of schemas.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the set holds no schemas.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

struct Resolver<'a> {
    entries: HashMap<&'a str, &'a SchemaEntry>,
    resolved: HashMap<&'a str, Arc<Schema>>,
    stack: Vec<&'a str>,
}

impl<'a> Resolver<'a> {
    fn schema(&mut self, name: &'a str) -> Result<Arc<Schema>> {
        if let Some(schema) = self.resolved.get(name) {
            return Ok(Arc::clone(schema));
        }
        if self.stack.contains(&name) {
            let mut cycle: Vec<&str> = self.stack.clone();
            cycle.push(name);
            return Err(ParserError::CyclicReference(cycle.join(" -> ")));
        }

        let entry = *self
            .entries
            .get(name)
            .ok_or_else(|| ParserError::UnknownType {
                schema: name.to_string(),
                field: String::new(),
                type_name: name.to_string(),
            })?;

        self.stack.push(name);
        let fields = entry
            .fields
            .iter()
            .map(|field| self.field(&entry.name, field))
            .collect::<Result<Vec<_>>>();
        self.stack.pop();

        let mut schema = Schema::define(&entry.name, fields?)?;
        if let Some(description) = &entry.description {
            schema = schema.with_description(description);
        }

        let schema = Arc::new(schema);
        self.resolved.insert(name, Arc::clone(&schema));
        Ok(schema)
    }

    fn field(&mut self, schema: &str, entry: &'a FieldEntry) -> Result<FieldDescriptor> {
        let kind = self.kind(schema, &entry.name, &entry.field_type)?;

        let mut field = FieldDescriptor::new(&entry.name, kind);
        field.required = entry.required;
        field.default = entry.default.clone();
        field.description = entry.description.clone();
        field.constraints = entry.constraints.clone();
        Ok(field)
    }

    fn kind(&mut self, schema: &str, field: &str, type_name: &'a str) -> Result<FieldKind> {
        let type_name = type_name.trim();

        if let Some(element) = list_element(type_name) {
            return Ok(FieldKind::list(self.kind(schema, field, element)?));
        }
        if let Some(primitive) = PrimitiveType::from_name(type_name) {
            return Ok(FieldKind::Primitive(primitive));
        }
        if self.entries.contains_key(type_name) {
            return Ok(FieldKind::Nested(self.schema(type_name)?));
        }

        Err(ParserError::UnknownType {
            schema: schema.to_string(),
            field: field.to_string(),
            type_name: type_name.to_string(),
        })
    }
}

/// Returns the element type of `list<T>` / `array<T>`.
fn list_element(type_name: &str) -> Option<&str> {
    let lower = type_name.to_ascii_lowercase();
    LIST_PREFIXES
        .iter()
        .find(|prefix| lower.starts_with(*prefix) && lower.ends_with('>'))
        .map(|prefix| type_name[prefix.len()..type_name.len() - 1].trim())
}
