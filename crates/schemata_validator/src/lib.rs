//! # Schemata Validator
//!
//! Validation engine for schemata. This crate checks raw JSON-like input
//! against a [`schemata_core::Schema`] and either produces a typed
//! [`ValidatedObject`] or a [`ValidationReport`] listing every failure:
//!
//! - Presence and nullability of required fields
//! - Coercion to the declared primitive types (numbers, booleans, timestamps, URLs)
//! - Constraint evaluation (lengths, list sizes, ranges, patterns, allowed values)
//! - Recursive validation of nested schemas and lists, with qualified paths
//! - Serialization of validated objects back to plain mappings or JSON
//!
//! ## Example
//!
//! ```rust
//! use schemata_core::{FieldBuilder, PrimitiveType, SchemaBuilder};
//! use schemata_validator::Validator;
//! use serde_json::json;
//!
//! let schema = SchemaBuilder::new("Article")
//!     .field(FieldBuilder::integer("id").build())
//!     .field(FieldBuilder::string("title").max_length(90).build())
//!     .field(FieldBuilder::list("authors", PrimitiveType::String).min_items(1).build())
//!     .build()
//!     .unwrap();
//!
//! let raw = json!({"id": "1", "title": "Hello", "authors": []});
//!
//! match Validator::new().validate_value(&schema, &raw) {
//!     Ok(article) => println!("{}", article.to_json(&[]).unwrap()),
//!     Err(report) => {
//!         assert_eq!(report.len(), 1);
//!         println!("{}", report);
//!     }
//! }
//! ```

pub mod coerce;
pub mod constraints;
mod engine;
mod error;
mod report;
mod serialize;
mod value;

pub use engine::*;
pub use error::*;
pub use report::*;
pub use serialize::*;
pub use value::*;
