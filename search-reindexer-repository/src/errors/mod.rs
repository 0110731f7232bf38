//! Error types for the search reindexer repository.
//!
//! One error type per external system: [`SearchIndexError`] for the search
//! engine and [`DocumentStoreError`] for the document store.

mod document_store_error;
mod search_index_error;

pub use document_store_error::DocumentStoreError;
pub use search_index_error::SearchIndexError;
