//! # Search Reindexer Repository
//!
//! This crate provides traits and implementations for the two external
//! systems the reindexer talks to: the document store that owns the source
//! records, and the search index that receives their projection. It includes
//! definitions for errors, interfaces, and concrete implementations for
//! MongoDB and Meilisearch.

pub mod errors;
pub mod interfaces;
pub mod meilisearch;
pub mod mongo;

pub use errors::{DocumentStoreError, SearchIndexError};
pub use interfaces::{DocumentStore, SearchIndexProvider};
pub use meilisearch::{IndexSettings, MeilisearchProvider};
pub use mongo::MongoDocumentStore;
