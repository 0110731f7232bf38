//! MongoDB implementation of the document store.
//!
//! This module reads source records from a MongoDB collection and decodes
//! them into [`SourceRecord`](search_reindexer_shared::SourceRecord)s.

mod decode;
mod store;

pub use decode::source_record_from_document;
pub use store::MongoDocumentStore;
