//! Parser for schemata schema documents (YAML/TOML/JSON formats).
//!
//! This crate loads declarative schema documents and links them into
//! [`schemata_core::Schema`] values ready for validation.
//!
//! # Example
//!
//! ```rust
//! use schemata_parser::parse_yaml;
//!
//! let yaml = r#"
//! schemas:
//!   - name: Article
//!     fields:
//!       - name: title
//!         type: string
//!         constraints:
//!           - type: max_length
//!             max: 90
//!       - name: photos
//!         type: list<Photo>
//!         required: false
//!   - name: Photo
//!     fields:
//!       - name: url
//!         type: url
//! "#;
//!
//! let schemas = parse_yaml(yaml).expect("Failed to parse schemas");
//! assert_eq!(schemas.names(), vec!["Article", "Photo"]);
//! ```

mod document;
mod resolve;

pub use document::*;
pub use resolve::*;

use schemata_core::SchemaDefinitionError;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while loading schemas.
#[derive(Debug, Error)]
pub enum ParserError {
    /// YAML parsing or deserialization failed
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml_ng::Error),

    /// TOML parsing or deserialization failed
    #[error("Failed to parse TOML: {0}")]
    TomlError(String),

    /// JSON parsing or deserialization failed
    #[error("Failed to parse JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File I/O error
    #[error("File I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Unsupported file format
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// Invalid file extension
    #[error("Invalid or missing file extension")]
    InvalidExtension,

    /// Two schemas share a name
    #[error("Duplicate schema name '{0}'")]
    DuplicateSchema(String),

    /// Field type is neither a primitive, a list, nor a declared schema
    #[error("Unknown type '{type_name}' for field '{field}' in schema '{schema}'")]
    UnknownType {
        /// Schema declaring the field
        schema: String,
        /// Field name
        field: String,
        /// Type expression that failed to resolve
        type_name: String,
    },

    /// Schemas reference each other in a loop
    #[error("Cyclic schema reference: {0}")]
    CyclicReference(String),

    /// Schema rejected by definition checks
    #[error("Invalid schema definition: {0}")]
    Definition(#[from] SchemaDefinitionError),
}

/// Result type alias for parser operations.
pub type Result<T> = std::result::Result<T, ParserError>;

/// Supported schema document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaFormat {
    /// YAML format (.yml, .yaml)
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

/// Parse schemas from a YAML string.
///
/// # Example
///
/// ```rust
/// use schemata_parser::parse_yaml;
///
/// let yaml = r#"
/// schemas:
///   - name: Photo
///     fields:
///       - { name: caption, type: string, required: false }
///       - { name: url, type: url }
/// "#;
///
/// let schemas = parse_yaml(yaml).unwrap();
/// let photo = schemas.get("Photo").unwrap();
/// assert!(!photo.field("caption").unwrap().required);
/// ```
pub fn parse_yaml(content: &str) -> Result<SchemaSet> {
    let document: SchemaDocument = serde_yaml_ng::from_str(content)?;
    SchemaSet::from_document(&document)
}

/// Parse schemas from a TOML string.
///
/// # Example
///
/// ```rust
/// use schemata_parser::parse_toml;
///
/// let toml = r#"
/// [[schemas]]
/// name = "Photo"
///
/// [[schemas.fields]]
/// name = "url"
/// type = "url"
/// "#;
///
/// let schemas = parse_toml(toml).unwrap();
/// assert_eq!(schemas.len(), 1);
/// ```
pub fn parse_toml(content: &str) -> Result<SchemaSet> {
    let document: SchemaDocument =
        toml::from_str(content).map_err(|e| ParserError::TomlError(e.to_string()))?;
    SchemaSet::from_document(&document)
}

/// Parse schemas from a JSON string.
pub fn parse_json(content: &str) -> Result<SchemaSet> {
    let document: SchemaDocument = serde_json::from_str(content)?;
    SchemaSet::from_document(&document)
}

/// Detect the document format from a file path based on its extension.
///
/// # Supported Extensions
///
/// * `.yaml`, `.yml` → `SchemaFormat::Yaml`
/// * `.toml` → `SchemaFormat::Toml`
/// * `.json` → `SchemaFormat::Json`
///
/// # Errors
///
/// Returns `ParserError::InvalidExtension` if the file has no extension.
/// Returns `ParserError::UnsupportedFormat` if the extension is not recognized.
pub fn detect_format(path: &Path) -> Result<SchemaFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or(ParserError::InvalidExtension)?;

    match extension.to_lowercase().as_str() {
        "yaml" | "yml" => Ok(SchemaFormat::Yaml),
        "toml" => Ok(SchemaFormat::Toml),
        "json" => Ok(SchemaFormat::Json),
        other => Err(ParserError::UnsupportedFormat(other.to_string())),
    }
}

/// Parse schemas from a file with automatic format detection.
///
/// # Example
///
/// ```no_run
/// use schemata_parser::parse_file;
/// use std::path::Path;
///
/// let schemas = parse_file(Path::new("schemas/article.yml")).unwrap();
/// println!("Loaded schemas: {:?}", schemas.names());
/// ```
pub fn parse_file(path: &Path) -> Result<SchemaSet> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        SchemaFormat::Yaml => parse_yaml(&content),
        SchemaFormat::Toml => parse_toml(&content),
        SchemaFormat::Json => parse_json(&content),
    }
}
