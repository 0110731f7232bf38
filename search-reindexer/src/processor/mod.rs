//! Processor module for the search reindexer.
//!
//! Transforms source records into index documents.

mod field_mapper;
mod normalizer;
mod record_processor;

pub use field_mapper::{FieldMapper, MappingIssue};
pub use normalizer::{normalize, DEFAULT_PREVIEW_MAX_LEN};
pub use record_processor::{ProcessedBatch, RecordIssue, RecordIssueKind, RecordProcessor};
