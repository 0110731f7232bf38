//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations.

use async_trait::async_trait;
use search_reindexer_shared::{IndexDocument, TaskHandle, TaskSnapshot};

use crate::errors::SearchIndexError;
use crate::meilisearch::IndexSettings;

/// Abstracts the underlying search engine.
///
/// Writes to the engine are asynchronous: `add_documents` returns as soon as
/// the engine has queued the work, and callers observe completion through
/// `get_task`. Implementations are injected into the reindex pipeline so that
/// tests can substitute an in-memory engine.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
///
/// # Note on Document Creation
///
/// There is no separate create or update call. `add_documents` is an upsert keyed
/// by the primary key: a document whose key already exists is replaced wholesale,
/// never merged field by field and never duplicated.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check that the engine is reachable and reports itself available.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the engine is ready for requests
    /// * `Err(SearchIndexError::ConnectionError)` - Otherwise
    async fn health_check(&self) -> Result<(), SearchIndexError>;

    /// Apply filterable, searchable and sortable attribute settings.
    ///
    /// Idempotent, safe to call on every run. The returned handles refer to the
    /// settings tasks the engine queued; callers are not required to wait on them.
    ///
    /// # Arguments
    ///
    /// * `settings` - The attribute lists to apply
    async fn configure_index(
        &self,
        settings: &IndexSettings,
    ) -> Result<Vec<TaskHandle>, SearchIndexError>;

    /// Queue an upsert of `documents` keyed by `primary_key`, as one batch.
    ///
    /// # Arguments
    ///
    /// * `documents` - The batch, sent in a single request
    /// * `primary_key` - Name of the unique key field
    ///
    /// # Returns
    ///
    /// * `Ok(TaskHandle)` - The engine accepted and queued the batch
    /// * `Err(SearchIndexError)` - The request failed and nothing was queued
    async fn add_documents(
        &self,
        documents: &[IndexDocument],
        primary_key: &str,
    ) -> Result<TaskHandle, SearchIndexError>;

    /// Read the current state of a queued task.
    async fn get_task(&self, task: TaskHandle) -> Result<TaskSnapshot, SearchIndexError>;

    /// Number of documents currently stored in the index.
    async fn document_count(&self) -> Result<u64, SearchIndexError>;
}
