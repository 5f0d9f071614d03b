//! Validation reports.
//!
//! A report is returned in place of a validated object whenever any check
//! fails. It lists every failure found in one pass, in the order fields were
//! visited.

use crate::Violation;
use schemata_core::FieldPath;
use std::fmt;

/// One failure in a [`ValidationReport`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    /// Location of the offending value
    pub path: FieldPath,
    /// What was wrong with it
    pub violation: Violation,
}

impl ReportEntry {
    /// Creates a new report entry.
    pub fn new(path: FieldPath, violation: Violation) -> Self {
        Self { path, violation }
    }

    /// Returns the name of the failed check.
    pub fn constraint(&self) -> &'static str {
        self.violation.constraint()
    }

    /// Returns the human-readable failure message.
    pub fn message(&self) -> String {
        self.violation.to_string()
    }
}

/// Every failure found while validating one input against a schema.
///
/// Displays in the familiar multi-line form:
///
/// ```text
/// 2 validation errors for Article
/// title
///   ensure this value has at most 90 characters (type=max_length)
/// authors
///   ensure this value has at least 1 items (type=min_items)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    schema: String,
    entries: Vec<ReportEntry>,
}

impl ValidationReport {
    /// Creates a new report for `schema`.
    pub fn new(schema: impl Into<String>, entries: Vec<ReportEntry>) -> Self {
        Self {
            schema: schema.into(),
            entries,
        }
    }

    /// Returns the name of the schema that was validated against.
    pub fn schema_name(&self) -> &str {
        &self.schema
    }

    /// Returns all entries in the order they were found.
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the report has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entries whose path displays as `path` (e.g. `photos[1].url`).
    pub fn entries_at<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ReportEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.path.to_string() == path)
    }

    /// Returns the failed check names in order.
    pub fn constraints(&self) -> Vec<&'static str> {
        self.entries.iter().map(ReportEntry::constraint).collect()
    }

    /// Consumes the report, returning its entries.
    pub fn into_entries(self) -> Vec<ReportEntry> {
        self.entries
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.entries.len();
        write!(
            f,
            "{} validation error{} for {}",
            count,
            if count == 1 { "" } else { "s" },
            self.schema
        )?;
        for entry in &self.entries {
            write!(
                f,
                "\n{}\n  {} (type={})",
                entry.path,
                entry.violation,
                entry.constraint()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ReportEntry;
    type IntoIter = std::slice::Iter<'a, ReportEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> ValidationReport {
        ValidationReport::new(
            "Article",
            vec![
                ReportEntry::new(FieldPath::from("title"), Violation::MaxLength { max: 90 }),
                ReportEntry::new(FieldPath::from("authors"), Violation::MinItems { min: 1 }),
            ],
        )
    }

    #[test]
    fn test_display() {
        let expected = "2 validation errors for Article\n\
                        title\n  ensure this value has at most 90 characters (type=max_length)\n\
                        authors\n  ensure this value has at least 1 items (type=min_items)";
        assert_eq!(sample_report().to_string(), expected);
    }

    #[test]
    fn test_display_singular() {
        let report = ValidationReport::new(
            "Photo",
            vec![ReportEntry::new(FieldPath::from("url"), Violation::Missing)],
        );
        assert!(report.to_string().starts_with("1 validation error for Photo\n"));
    }

    #[test]
    fn test_lookup_helpers() {
        let report = sample_report();

        assert_eq!(report.len(), 2);
        assert_eq!(report.constraints(), vec!["max_length", "min_items"]);
        assert_eq!(report.entries_at("title").count(), 1);
        assert_eq!(report.entries_at("text").count(), 0);

        let entry = report.entries_at("authors").next().unwrap();
        assert_eq!(entry.message(), "ensure this value has at least 1 items");
    }
}
