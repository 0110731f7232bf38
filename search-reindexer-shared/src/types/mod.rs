//! This module defines the core data structures used across the search reindexer.
//! It re-exports the record, document and task types.

pub mod access_level;
pub mod index_document;
pub mod indexing_task;
pub mod source_record;

pub use access_level::AccessLevel;
pub use index_document::IndexDocument;
pub use indexing_task::{TaskHandle, TaskSnapshot, TaskStatus};
pub use source_record::{LastUpdated, SourceRecord};
