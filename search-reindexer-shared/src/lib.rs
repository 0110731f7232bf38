//! # Search Reindexer Shared
//!
//! This crate defines the data structures shared across the search reindexer:
//! the records read from the document store, the documents written to the
//! search index, and the handles used to observe asynchronous indexing tasks.

pub mod types;

pub use types::access_level::AccessLevel;
pub use types::index_document::IndexDocument;
pub use types::indexing_task::{TaskHandle, TaskSnapshot, TaskStatus};
pub use types::source_record::{LastUpdated, SourceRecord};
