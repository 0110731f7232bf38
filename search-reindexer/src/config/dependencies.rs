//! Dependency initialization and wiring for the search reindexer.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::{ConnectionMode, ReindexConfig};
use crate::loader::{BatchUploader, LoaderConfig};
use crate::orchestrator::Orchestrator;
use crate::processor::{FieldMapper, RecordProcessor};
use crate::waiter::{CompletionWaiter, TokioClock};
use crate::ReindexError;
use search_reindexer_repository::{
    DocumentStore, IndexSettings, MeilisearchProvider, MongoDocumentStore, SearchIndexProvider,
};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured orchestrator ready to run.
    pub orchestrator: Orchestrator,
}

impl Dependencies {
    /// Connect to both collaborators and wire the pipeline.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ReindexError::ConnectivityError)` - A collaborator is unreachable (only in fail-fast mode)
    /// * `Err(ReindexError::ConfigError)` - A client could not be constructed
    pub async fn new(config: &ReindexConfig) -> Result<Self, ReindexError> {
        info!(
            mongodb_database = %config.mongodb_database,
            mongodb_collection = %config.mongodb_collection,
            meilisearch_url = %config.meilisearch_url,
            index = %config.index_name,
            api_key_set = config.meilisearch_api_key.is_some(),
            connection_mode = %config.connection_mode,
            retry_interval_secs = config.retry_interval.as_secs(),
            "Initializing dependencies"
        );
        info!(
            s3_endpoint = %config.s3_endpoint,
            s3_bucket = %config.s3_bucket,
            "Blob store configured, content previews use the title surrogate"
        );

        let store = MongoDocumentStore::connect(
            &config.mongodb_uri,
            &config.mongodb_database,
            &config.mongodb_collection,
        )
        .await
        .map_err(|e| ReindexError::config(format!("Failed to create MongoDB client: {}", e)))?;

        connect_with_mode(
            "MongoDB",
            config.connection_mode,
            config.retry_interval,
            || store.ping(),
        )
        .await?;
        info!("MongoDB connection established");

        match store.count().await {
            Ok(count) => info!(count, "Documents in store"),
            Err(e) => warn!(error = %e, "Failed to count documents in store"),
        }

        let provider = MeilisearchProvider::with_timeout(
            &config.meilisearch_url,
            config.meilisearch_api_key.clone(),
            config.index_name.clone(),
            config.meilisearch_timeout,
        )
        .map_err(|e| {
            ReindexError::config(format!("Failed to create Meilisearch provider: {}", e))
        })?;

        connect_with_mode(
            "Meilisearch",
            config.connection_mode,
            config.retry_interval,
            || provider.health_check(),
        )
        .await?;
        info!("Meilisearch connection established");

        let store: Arc<dyn DocumentStore> = Arc::new(store);
        let provider: Arc<dyn SearchIndexProvider> = Arc::new(provider);
        let settings = IndexSettings::new(config.index_name.clone());

        let processor = RecordProcessor::new(FieldMapper::new(config.preview_max_len));
        let uploader = BatchUploader::with_config(
            provider.clone(),
            LoaderConfig {
                primary_key: settings.primary_key.clone(),
                max_batch_size: config.max_batch_size,
            },
        );
        let waiter = CompletionWaiter::new(
            provider.clone(),
            Arc::new(TokioClock),
            config.wait_policy.clone(),
        );

        let orchestrator =
            Orchestrator::new(store, provider, processor, uploader, waiter, settings);

        Ok(Self { orchestrator })
    }
}

/// Run `attempt` until it succeeds, or once in fail-fast mode.
async fn connect_with_mode<F, Fut, E>(
    name: &str,
    mode: ConnectionMode,
    retry_interval: Duration,
    mut attempt: F,
) -> Result<(), ReindexError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: std::fmt::Display,
{
    loop {
        match attempt().await {
            Ok(()) => return Ok(()),
            Err(e) => match mode {
                ConnectionMode::FailFast => {
                    return Err(ReindexError::connectivity(format!(
                        "Failed to connect to {}: {}",
                        name, e
                    )));
                }
                ConnectionMode::Retry => {
                    warn!(
                        target_system = name,
                        error = %e,
                        retry_interval_secs = retry_interval.as_secs(),
                        "Failed to connect, retrying..."
                    );
                    sleep(retry_interval).await;
                }
            },
        }
    }
}
