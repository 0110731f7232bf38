//! Source record to index document mapping.

use std::fmt;

use search_reindexer_shared::{AccessLevel, IndexDocument, SourceRecord};

use crate::processor::normalizer::{normalize, DEFAULT_PREVIEW_MAX_LEN};

/// A data-quality problem noticed while mapping a record.
///
/// None of these stop the mapping; each one names the default that was used instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    /// No slug. The document is uploaded with an empty primary key.
    MissingSlug,
    /// No access level label; rank 1 was used.
    MissingAccessLevel,
    /// A label outside the closed set; rank 1 was used.
    UnknownAccessLevel(String),
    /// No convertible last-updated value; 0 was used.
    MissingTimestamp,
}

impl fmt::Display for MappingIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingIssue::MissingSlug => write!(f, "missing slug"),
            MappingIssue::MissingAccessLevel => {
                write!(f, "missing access level, defaulted to {}", AccessLevel::DEFAULT)
            }
            MappingIssue::UnknownAccessLevel(label) => write!(
                f,
                "unknown access level '{}', defaulted to {}",
                label,
                AccessLevel::DEFAULT
            ),
            MappingIssue::MissingTimestamp => write!(f, "missing last_updated, defaulted to 0"),
        }
    }
}

/// Maps source records to index documents.
///
/// Mapping is total: every record, however incomplete, produces a document.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    preview_max_len: usize,
}

impl FieldMapper {
    pub fn new(preview_max_len: usize) -> Self {
        Self { preview_max_len }
    }

    /// Map one record to its index document.
    pub fn map(&self, record: &SourceRecord) -> IndexDocument {
        self.map_with_issues(record).0
    }

    /// Map one record and report which fields had to be defaulted.
    pub fn map_with_issues(&self, record: &SourceRecord) -> (IndexDocument, Vec<MappingIssue>) {
        let mut issues = Vec::new();

        if record.slug.is_none() {
            issues.push(MappingIssue::MissingSlug);
        }
        match record.access_level.as_deref() {
            None => issues.push(MappingIssue::MissingAccessLevel),
            Some(label) if AccessLevel::from_label(label).is_none() => {
                issues.push(MappingIssue::UnknownAccessLevel(label.to_string()))
            }
            Some(_) => {}
        }
        if record.last_updated.is_missing() {
            issues.push(MappingIssue::MissingTimestamp);
        }

        let title = record.title.clone().unwrap_or_default();
        let content_preview = normalize(&content_surrogate(&title), self.preview_max_len);

        let document = IndexDocument {
            slug: record.slug.clone().unwrap_or_default(),
            title,
            access_level: AccessLevel::rank_for_label(record.access_level.as_deref()),
            service_owner: record.service_owner.clone().unwrap_or_default(),
            tags: record.tags.clone().unwrap_or_default(),
            content_preview,
            last_updated: record.last_updated.epoch_seconds(),
        };

        (document, issues)
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_MAX_LEN)
    }
}

/// Text standing in for the document body when building the preview.
///
/// Bodies live in the blob store, which the reindexer does not read.
fn content_surrogate(title: &str) -> String {
    format!("{} - Documentation content", title)
}

#[cfg(test)]
mod tests {
    use super::*;
    use search_reindexer_shared::LastUpdated;

    fn full_record() -> SourceRecord {
        SourceRecord {
            slug: Some("engineering/deploy".to_string()),
            title: Some("Deployment Guide".to_string()),
            access_level: Some("Architect".to_string()),
            service_owner: Some("platform".to_string()),
            tags: Some(vec!["k8s".to_string(), "ops".to_string()]),
            last_updated: LastUpdated::RawEpoch(1_700_000_000),
        }
    }

    #[test]
    fn test_map_full_record() {
        let (doc, issues) = FieldMapper::default().map_with_issues(&full_record());

        assert_eq!(
            doc,
            IndexDocument {
                slug: "engineering/deploy".to_string(),
                title: "Deployment Guide".to_string(),
                access_level: 2,
                service_owner: "platform".to_string(),
                tags: vec!["k8s".to_string(), "ops".to_string()],
                content_preview: "Deployment Guide - Documentation content".to_string(),
                last_updated: 1_700_000_000,
            }
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn test_map_empty_record_uses_defaults() {
        let (doc, issues) = FieldMapper::default().map_with_issues(&SourceRecord::default());

        assert_eq!(doc.slug, "");
        assert_eq!(doc.title, "");
        assert_eq!(doc.access_level, 1);
        assert_eq!(doc.service_owner, "");
        assert!(doc.tags.is_empty());
        assert_eq!(doc.last_updated, 0);
        assert_eq!(doc.content_preview, "- Documentation content");
        assert_eq!(
            issues,
            vec![
                MappingIssue::MissingSlug,
                MappingIssue::MissingAccessLevel,
                MappingIssue::MissingTimestamp,
            ]
        );
    }

    #[test]
    fn test_unknown_access_level_maps_to_developer() {
        let mut record = full_record();
        record.access_level = Some("Owner".to_string());

        let (doc, issues) = FieldMapper::default().map_with_issues(&record);

        assert_eq!(doc.access_level, 1);
        assert_eq!(
            issues,
            vec![MappingIssue::UnknownAccessLevel("Owner".to_string())]
        );
    }

    #[test]
    fn test_access_level_table() {
        let mapper = FieldMapper::default();
        for (label, rank) in [("Public", 0), ("Developer", 1), ("Architect", 2), ("Admin", 3)] {
            let mut record = full_record();
            record.access_level = Some(label.to_string());
            assert_eq!(mapper.map(&record).access_level, rank, "label {}", label);
        }
    }

    #[test]
    fn test_preview_is_normalized_and_bounded() {
        let mut record = full_record();
        record.title = Some(format!("**{}**", "x".repeat(300)));

        let doc = FieldMapper::new(50).map(&record);

        assert_eq!(doc.title.len(), 304);
        assert_eq!(doc.content_preview, "x".repeat(50));
    }

    #[test]
    fn test_issue_messages() {
        assert_eq!(
            MappingIssue::UnknownAccessLevel("Owner".to_string()).to_string(),
            "unknown access level 'Owner', defaulted to Developer"
        );
        assert_eq!(
            MappingIssue::MissingTimestamp.to_string(),
            "missing last_updated, defaulted to 0"
        );
    }
}
