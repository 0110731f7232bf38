//! Loader module for the search reindexer.
//!
//! Submits the processed batch to the search index as a single upsert.

use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::errors::UploadError;
use search_reindexer_repository::SearchIndexProvider;
use search_reindexer_shared::{IndexDocument, TaskHandle};

/// Configuration for the batch uploader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Field the engine uses to deduplicate documents.
    pub primary_key: String,
    /// Largest batch accepted for submission. `None` disables the check.
    pub max_batch_size: Option<usize>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            primary_key: IndexDocument::PRIMARY_KEY.to_string(),
            max_batch_size: None,
        }
    }
}

/// Uploader that submits documents to the search engine.
///
/// Submission returns as soon as the engine has queued the work; waiting for
/// the resulting task is left to the caller.
pub struct BatchUploader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl BatchUploader {
    /// Create a new uploader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(provider, LoaderConfig::default())
    }

    /// Create a new uploader with custom configuration.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        Self { provider, config }
    }

    /// Submit the whole batch in one request.
    ///
    /// # Returns
    ///
    /// * `Ok(TaskHandle)` - The engine queued the batch
    /// * `Err(UploadError::EmptyBatch)` - Nothing to upload, no request sent
    /// * `Err(UploadError::BatchSizeExceeded)` - Batch over the configured maximum, no request sent
    /// * `Err(UploadError::Provider)` - The engine rejected the request
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn upload(&self, documents: &[IndexDocument]) -> Result<TaskHandle, UploadError> {
        if documents.is_empty() {
            return Err(UploadError::EmptyBatch);
        }
        if let Some(max) = self.config.max_batch_size {
            if documents.len() > max {
                return Err(UploadError::BatchSizeExceeded {
                    provided: documents.len(),
                    max,
                });
            }
        }

        match self
            .provider
            .add_documents(documents, &self.config.primary_key)
            .await
        {
            Ok(task) => {
                info!(
                    task_uid = task.uid,
                    count = documents.len(),
                    "Batch queued for indexing"
                );
                Ok(task)
            }
            Err(e) => {
                error!(error = %e, count = documents.len(), "Failed to upload batch");
                Err(UploadError::Provider(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use search_reindexer_repository::{IndexSettings, SearchIndexError};
    use search_reindexer_shared::{TaskSnapshot, TaskStatus};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock search provider for testing.
    struct MockSearchProvider {
        add_calls: AtomicUsize,
        last_primary_key: Mutex<Option<String>>,
        reject: bool,
    }

    impl MockSearchProvider {
        fn new() -> Self {
            Self {
                add_calls: AtomicUsize::new(0),
                last_primary_key: Mutex::new(None),
                reject: false,
            }
        }

        fn rejecting() -> Self {
            Self {
                reject: true,
                ..Self::new()
            }
        }
    }

    #[async_trait]
    impl SearchIndexProvider for MockSearchProvider {
        async fn health_check(&self) -> Result<(), SearchIndexError> {
            Ok(())
        }

        async fn configure_index(
            &self,
            _settings: &IndexSettings,
        ) -> Result<Vec<TaskHandle>, SearchIndexError> {
            Ok(Vec::new())
        }

        async fn add_documents(
            &self,
            _documents: &[IndexDocument],
            primary_key: &str,
        ) -> Result<TaskHandle, SearchIndexError> {
            self.add_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_primary_key.lock().unwrap() = Some(primary_key.to_string());
            if self.reject {
                return Err(SearchIndexError::upload("invalid_api_key"));
            }
            Ok(TaskHandle::new(7))
        }

        async fn get_task(&self, task: TaskHandle) -> Result<TaskSnapshot, SearchIndexError> {
            Ok(TaskSnapshot::new(task.uid, TaskStatus::Succeeded))
        }

        async fn document_count(&self) -> Result<u64, SearchIndexError> {
            Ok(0)
        }
    }

    fn documents(count: usize) -> Vec<IndexDocument> {
        (0..count)
            .map(|i| IndexDocument {
                slug: format!("doc-{}", i),
                title: format!("Doc {}", i),
                access_level: 1,
                service_owner: "docs-team".to_string(),
                tags: Vec::new(),
                content_preview: format!("Doc {} - Documentation content", i),
                last_updated: 0,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_upload_returns_task_handle() {
        let provider = Arc::new(MockSearchProvider::new());
        let uploader = BatchUploader::new(provider.clone());

        let task = uploader.upload(&documents(3)).await.unwrap();

        assert_eq!(task, TaskHandle::new(7));
        assert_eq!(provider.add_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            provider.last_primary_key.lock().unwrap().as_deref(),
            Some("slug")
        );
    }

    #[tokio::test]
    async fn test_empty_batch_is_refused_locally() {
        let provider = Arc::new(MockSearchProvider::new());
        let uploader = BatchUploader::new(provider.clone());

        let result = uploader.upload(&[]).await;

        assert!(matches!(result, Err(UploadError::EmptyBatch)));
        assert_eq!(provider.add_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_batch_is_refused_locally() {
        let provider = Arc::new(MockSearchProvider::new());
        let uploader = BatchUploader::with_config(
            provider.clone(),
            LoaderConfig {
                max_batch_size: Some(2),
                ..Default::default()
            },
        );

        let result = uploader.upload(&documents(3)).await;

        assert!(matches!(
            result,
            Err(UploadError::BatchSizeExceeded {
                provided: 3,
                max: 2
            })
        ));
        assert_eq!(provider.add_calls.load(Ordering::SeqCst), 0);

        assert!(uploader.upload(&documents(2)).await.is_ok());
    }

    #[tokio::test]
    async fn test_provider_rejection_is_upload_error() {
        let provider = Arc::new(MockSearchProvider::rejecting());
        let uploader = BatchUploader::new(provider);

        let result = uploader.upload(&documents(1)).await;

        assert!(matches!(
            result,
            Err(UploadError::Provider(SearchIndexError::UploadError(_)))
        ));
    }
}
