//! # Schemata Core
//!
//! Declarative model for the schemata validation engine.
//!
//! This crate provides the building blocks for describing the shape of a
//! record: which fields it has, what kind of value each holds, whether the
//! field is required, and which constraints the value must satisfy. It does
//! not validate anything itself; see `schemata_validator` for that.
//!
//! ## Key Concepts
//!
//! - **FieldDescriptor**: Declares one field's kind, optionality, default and constraints
//! - **Constraint**: A named, parameterized predicate (length bounds, list size, ranges, patterns)
//! - **Schema**: An ordered, immutable set of fields, possibly nesting other schemas
//! - **FieldPath**: Dotted/bracketed address of a value inside a record (`photos[1].url`)
//!
//! ## Example
//!
//! ```rust
//! use schemata_core::{FieldBuilder, FieldKind, PrimitiveType, SchemaBuilder};
//!
//! let photo = SchemaBuilder::new("Photo")
//!     .field(FieldBuilder::string("caption").optional().build())
//!     .field(FieldBuilder::url("url").build())
//!     .build()
//!     .unwrap();
//!
//! let article = SchemaBuilder::new("Article")
//!     .field(FieldBuilder::integer("id").build())
//!     .field(FieldBuilder::string("title").max_length(90).build())
//!     .field(FieldBuilder::list("authors", PrimitiveType::String).min_items(1).build())
//!     .field(FieldBuilder::list("photos", FieldKind::nested(photo)).optional().build())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(article.len(), 4);
//! ```

pub mod builder;
pub mod constraint;
pub mod context;
pub mod error;
pub mod path;
pub mod schema;

pub use builder::*;
pub use constraint::*;
pub use context::*;
pub use error::*;
pub use path::*;
pub use schema::*;
