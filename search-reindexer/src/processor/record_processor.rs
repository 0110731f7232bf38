//! Record processor implementation.
//!
//! Transforms source records into IndexDocument structures for indexing.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use crate::processor::field_mapper::{FieldMapper, MappingIssue};
use search_reindexer_shared::{IndexDocument, SourceRecord};

/// Mapping issues raised for one record, keyed by its slug for logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordIssue {
    pub slug: String,
    pub issue: RecordIssueKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordIssueKind {
    Mapping(MappingIssue),
    /// Another record in the same batch carries this slug; the engine keeps the later one.
    DuplicateSlug,
}

impl std::fmt::Display for RecordIssueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordIssueKind::Mapping(issue) => write!(f, "{}", issue),
            RecordIssueKind::DuplicateSlug => write!(f, "duplicate slug in batch"),
        }
    }
}

/// Result of processing one batch of source records.
#[derive(Debug, Default)]
pub struct ProcessedBatch {
    /// One document per input record, in input order.
    pub documents: Vec<IndexDocument>,
    pub issues: Vec<RecordIssue>,
}

/// Processor that transforms source records into search documents.
pub struct RecordProcessor {
    mapper: FieldMapper,
}

impl RecordProcessor {
    /// Create a new record processor.
    pub fn new(mapper: FieldMapper) -> Self {
        Self { mapper }
    }

    /// Process a batch of source records.
    ///
    /// Every record yields exactly one document. Incomplete records are
    /// mapped with defaults and reported in [`ProcessedBatch::issues`].
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub fn process_batch(&self, records: Vec<SourceRecord>) -> ProcessedBatch {
        let mut batch = ProcessedBatch {
            documents: Vec::with_capacity(records.len()),
            issues: Vec::new(),
        };
        let mut seen: HashMap<String, usize> = HashMap::new();

        for record in &records {
            let (document, issues) = self.mapper.map_with_issues(record);
            let slug = record.display_slug().to_string();

            for issue in issues {
                warn!(slug = %slug, issue = %issue, "Defaulted field while mapping record");
                batch.issues.push(RecordIssue {
                    slug: slug.clone(),
                    issue: RecordIssueKind::Mapping(issue),
                });
            }

            if record.slug.is_some() {
                let occurrences = seen.entry(document.slug.clone()).or_insert(0);
                *occurrences += 1;
                if *occurrences == 2 {
                    warn!(slug = %slug, "Duplicate slug in batch, the last record wins");
                    batch.issues.push(RecordIssue {
                        slug,
                        issue: RecordIssueKind::DuplicateSlug,
                    });
                }
            }

            batch.documents.push(document);
        }

        debug!(
            document_count = batch.documents.len(),
            issue_count = batch.issues.len(),
            "Processed record batch"
        );
        batch
    }
}

impl Default for RecordProcessor {
    fn default() -> Self {
        Self::new(FieldMapper::default())
    }
}
