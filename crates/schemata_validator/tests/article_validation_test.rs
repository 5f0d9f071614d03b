//! Integration tests for the validation engine.
//!
//! These tests load the article/photo schemas from a schema document and run
//! realistic records through validation, error reporting, correction and
//! serialization.

use anyhow::Result;
use pretty_assertions::assert_eq;
use schemata_core::{FieldBuilder, FieldKind, PrimitiveType, Schema, SchemaBuilder};
use schemata_parser::parse_file;
use schemata_validator::{FieldValue, Validator, Violation, validate};
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn load_json(name: &str) -> Result<Map<String, Value>> {
    let content = std::fs::read_to_string(fixture(name))?;
    Ok(serde_json::from_str(&content)?)
}

fn article_schema() -> Result<Arc<Schema>> {
    let schemas = parse_file(&fixture("article.yaml"))?;
    schemas
        .get("Article")
        .ok_or_else(|| anyhow::anyhow!("Article schema missing from document"))
}

#[test]
fn test_valid_article() -> Result<()> {
    let schema = article_schema()?;
    let raw = load_json("valid_article.json")?;

    let article = validate(&schema, &raw)?;

    assert_eq!(
        article.get("title").and_then(FieldValue::as_str),
        Some("Local rail line reopens after two years of repairs")
    );
    assert_eq!(
        article.get("tags"),
        Some(&FieldValue::List(vec![
            FieldValue::from("transport"),
            FieldValue::from("local"),
        ]))
    );
    assert_eq!(article.get("links"), Some(&FieldValue::Empty));
    Ok(())
}

#[test]
fn test_valid_article_to_mapping() -> Result<()> {
    let schema = article_schema()?;
    let article = validate(&schema, &load_json("valid_article.json")?)?;

    let mapping = Value::Object(article.to_mapping(&[]));

    assert_eq!(mapping["timestamp"], json!("2021-03-04T10:20:30Z"));
    assert_eq!(
        mapping["photos"],
        json!([
            {"caption": "The first train arrives", "url": "https://images.example.com/rail/arrival.jpg"},
            {"caption": null, "url": "https://images.example.com/rail/platform.jpg"},
        ])
    );
    assert_eq!(mapping["links"], Value::Null);

    let keys: Vec<&String> = mapping.as_object().map(|m| m.keys().collect()).unwrap_or_default();
    assert_eq!(
        keys,
        vec![
            "id",
            "source",
            "timestamp",
            "title",
            "text",
            "tags",
            "photos",
            "authors",
            "links"
        ]
    );
    Ok(())
}

#[test]
fn test_invalid_article_report() -> Result<()> {
    let schema = article_schema()?;
    let raw = load_json("invalid_article.json")?;

    let report = validate(&schema, &raw).unwrap_err();

    assert_eq!(report.schema_name(), "Article");
    assert_eq!(report.constraints(), vec!["integer", "max_length"]);
    assert_eq!(
        report.to_string(),
        "2 validation errors for Article\n\
         id\n  value is not a valid integer (type=integer)\n\
         title\n  ensure this value has at most 90 characters (type=max_length)"
    );
    Ok(())
}

#[test]
fn test_corrected_article_validates() -> Result<()> {
    let schema = article_schema()?;
    let mut raw = load_json("invalid_article.json")?;

    let title: String = raw["title"]
        .as_str()
        .map(|t| t.chars().take(87).collect())
        .unwrap_or_default();
    raw.insert("id".to_string(), json!(2));
    raw.insert("title".to_string(), json!(format!("{}...", title)));

    let article = validate(&schema, &raw)?;
    assert_eq!(article.get("id"), Some(&FieldValue::Integer(2)));

    let mapping = article.to_mapping(&["text"]);
    assert!(!mapping.contains_key("text"));
    assert_eq!(mapping["timestamp"], json!("2021-03-05T08:00:00+01:00"));
    assert_eq!(mapping["links"], json!(["https://example.com/budget-2021"]));
    Ok(())
}

#[test]
fn test_round_trip_is_stable() -> Result<()> {
    let schema = article_schema()?;
    let first = validate(&schema, &load_json("valid_article.json")?)?;

    let second = validate(&schema, &first.to_mapping(&[]))?;
    assert_eq!(first, second);

    let json = second.to_json(&[])?;
    let third = Validator::new().validate_value(&schema, &serde_json::from_str(&json)?)?;
    assert_eq!(first, third);
    Ok(())
}

#[test]
fn test_nested_failures_are_addressed_by_index() -> Result<()> {
    let schema = article_schema()?;
    let mut raw = load_json("valid_article.json")?;
    raw.insert(
        "photos".to_string(),
        json!([
            {"caption": "ok", "url": "https://images.example.com/a.jpg"},
            {"caption": "broken", "url": "images.example.com/b.jpg"},
        ]),
    );

    let report = validate(&schema, &raw).unwrap_err();

    assert_eq!(report.entries_at("photos[0].url").count(), 0);
    let entry = report
        .entries_at("photos[1].url")
        .next()
        .ok_or_else(|| anyhow::anyhow!("no entry for photos[1].url"))?;
    assert_eq!(
        entry.violation,
        Violation::invalid_url("invalid or missing URL scheme")
    );
    Ok(())
}

#[test]
fn test_missing_required_field_is_one_entry() -> Result<()> {
    let schema = article_schema()?;
    let mut raw = load_json("valid_article.json")?;
    raw.remove("source");
    raw.insert("authors".to_string(), json!([]));

    let report = validate(&schema, &raw).unwrap_err();

    assert_eq!(report.entries_at("source").count(), 1);
    assert_eq!(report.constraints(), vec!["missing", "min_items"]);
    Ok(())
}

#[test]
fn test_title_length_boundary() {
    let schema = SchemaBuilder::new("Article")
        .field(FieldBuilder::integer("id").build())
        .field(FieldBuilder::string("title").max_length(90).build())
        .field(
            FieldBuilder::list("authors", PrimitiveType::String)
                .min_items(1)
                .build(),
        )
        .build()
        .unwrap();
    let validator = Validator::new();

    let failing = json!({"id": 1, "title": "x".repeat(95), "authors": []});
    let report = validator.validate_value(&schema, &failing).unwrap_err();
    assert_eq!(report.len(), 2);
    assert_eq!(report.constraints(), vec!["max_length", "min_items"]);

    let passing = json!({"id": 1, "title": format!("{}...", "x".repeat(87)), "authors": ["a"]});
    assert!(validator.validate_value(&schema, &passing).is_ok());
}

#[test]
fn test_non_ascii_photo_url_round_trips() -> Result<()> {
    let schema = article_schema()?;
    let photo = match schema.field("photos").map(|f| &f.kind) {
        Some(FieldKind::List(element)) => match element.as_ref() {
            FieldKind::Nested(photo) => Arc::clone(photo),
            other => anyhow::bail!("unexpected photo element kind {}", other),
        },
        _ => anyhow::bail!("photos is not a list field"),
    };

    let raw = json!({"url": format!("https://images.example.com/{}", "é".repeat(300))});
    let first = Validator::new().validate_value(&photo, &raw)?;
    let second = validate(&photo, &first.to_mapping(&[]))?;
    assert_eq!(first, second);

    let too_long = json!({"url": format!("https://images.example.com/{}", "é".repeat(1000))});
    let report = Validator::new()
        .validate_value(&photo, &too_long)
        .unwrap_err();
    assert_eq!(report.constraints(), vec!["url"]);
    Ok(())
}

#[test]
fn test_numeric_timestamp_boundaries_round_trip() -> Result<()> {
    let schema = SchemaBuilder::new("Event")
        .field(FieldBuilder::timestamp("at").build())
        .build()?;

    let last = Validator::new().validate_value(&schema, &json!({"at": 253_402_300_799_000_i64}))?;
    let mapping = last.to_mapping(&[]);
    assert_eq!(mapping["at"], json!("9999-12-31T23:59:59Z"));
    assert_eq!(validate(&schema, &mapping)?, last);

    for out_of_range in [5_000_000_000_000_000_i64, -70_000_000_000_000_i64] {
        let report = Validator::new()
            .validate_value(&schema, &json!({ "at": out_of_range }))
            .unwrap_err();
        assert_eq!(report.constraints(), vec!["timestamp"]);
    }
    Ok(())
}
