//! Meilisearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! that talks to Meilisearch over its HTTP API.

mod index_settings;
mod provider;

pub use index_settings::{IndexSettings, DEFAULT_INDEX_NAME};
pub use provider::{MeilisearchProvider, DEFAULT_REQUEST_TIMEOUT};
