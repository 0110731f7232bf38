//! Interface definitions for the document store and the search index.
//!
//! These traits allow dependency injection of the external systems so the
//! reindex pipeline can run against in-memory fakes in tests.

mod document_store;
mod search_index_provider;

pub use document_store::DocumentStore;
pub use search_index_provider::SearchIndexProvider;
