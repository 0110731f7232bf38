//! Meilisearch provider implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! on top of the Meilisearch HTTP API, using `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, error, info};
use url::Url;

use search_reindexer_shared::{IndexDocument, TaskHandle, TaskSnapshot, TaskStatus};

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::meilisearch::index_settings::IndexSettings;

/// Default limit on a single HTTP request, connection included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Summary returned by every asynchronous write endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskInfo {
    task_uid: u64,
}

#[derive(Debug, Deserialize)]
struct Task {
    uid: u64,
    status: TaskStatus,
    #[serde(default)]
    error: Option<TaskError>,
}

#[derive(Debug, Deserialize)]
struct TaskError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IndexStats {
    number_of_documents: u64,
}

#[derive(Debug, Deserialize)]
struct Health {
    status: String,
}

/// Meilisearch provider implementation.
///
/// # Example
///
/// ```ignore
/// let provider = MeilisearchProvider::new("http://localhost:7700", Some(api_key), "documents")?;
/// provider.health_check().await?;
///
/// let task = provider.add_documents(&documents, "slug").await?;
/// let snapshot = provider.get_task(task).await?;
/// ```
pub struct MeilisearchProvider {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    index_name: String,
}

impl MeilisearchProvider {
    /// Create a new provider for the index `index_name` on the server at `url`.
    ///
    /// No request is sent; use [`SearchIndexProvider::health_check`] to verify connectivity.
    ///
    /// # Arguments
    ///
    /// * `url` - The Meilisearch server URL (e.g., "http://localhost:7700")
    /// * `api_key` - Optional key sent as a bearer token
    /// * `index_name` - The index uid
    ///
    /// # Returns
    ///
    /// * `Ok(MeilisearchProvider)` - A new provider instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the HTTP client cannot be built
    pub fn new(
        url: &str,
        api_key: Option<String>,
        index_name: impl Into<String>,
    ) -> Result<Self, SearchIndexError> {
        Self::with_timeout(url, api_key, index_name, DEFAULT_REQUEST_TIMEOUT)
    }

    /// Like [`MeilisearchProvider::new`], with every request bounded by `request_timeout`.
    pub fn with_timeout(
        url: &str,
        api_key: Option<String>,
        index_name: impl Into<String>,
        request_timeout: Duration,
    ) -> Result<Self, SearchIndexError> {
        let mut base_url = Url::parse(url).map_err(|e| {
            SearchIndexError::connection(format!("Invalid Meilisearch URL '{}': {}", url, e))
        })?;

        // Url::join replaces the last path segment unless the base ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let index_name = index_name.into();

        info!(
            url = %base_url,
            index = %index_name,
            authenticated = api_key.is_some(),
            request_timeout_secs = request_timeout.as_secs_f64(),
            "Created Meilisearch provider"
        );

        Ok(Self {
            client,
            base_url,
            api_key,
            index_name,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SearchIndexError> {
        self.base_url
            .join(path)
            .map_err(|e| SearchIndexError::unknown(format!("Invalid endpoint '{}': {}", path, e)))
    }

    fn index_endpoint(&self, path: &str) -> Result<Url, SearchIndexError> {
        self.endpoint(&format!("indexes/{}/{}", self.index_name, path))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key),
            None => builder,
        }
    }

    /// Return the response if its status is a success, or a message describing the failure.
    async fn ensure_success(response: Response, operation: &str) -> Result<Response, String> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %body, operation, "Meilisearch request failed");
        Err(format!("{} failed with status {}: {}", operation, status, body))
    }

    async fn put_setting(
        &self,
        setting: &str,
        attributes: &[String],
    ) -> Result<TaskHandle, SearchIndexError> {
        let url = self.index_endpoint(&format!("settings/{}", setting))?;

        let response = self
            .authorized(self.client.put(url))
            .json(attributes)
            .send()
            .await
            .map_err(|e| SearchIndexError::configuration(e.to_string()))?;

        let response = Self::ensure_success(response, setting)
            .await
            .map_err(SearchIndexError::configuration)?;

        let info: TaskInfo = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        debug!(setting, task_uid = info.task_uid, "Index setting queued");
        Ok(TaskHandle::new(info.task_uid))
    }
}

#[async_trait]
impl SearchIndexProvider for MeilisearchProvider {
    async fn health_check(&self) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let response = Self::ensure_success(response, "health")
            .await
            .map_err(SearchIndexError::connection)?;

        let health: Health = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        if health.status != "available" {
            return Err(SearchIndexError::connection(format!(
                "Meilisearch reported status '{}'",
                health.status
            )));
        }

        Ok(())
    }

    async fn configure_index(
        &self,
        settings: &IndexSettings,
    ) -> Result<Vec<TaskHandle>, SearchIndexError> {
        let tasks = vec![
            self.put_setting("filterable-attributes", &settings.filterable_attributes)
                .await?,
            self.put_setting("searchable-attributes", &settings.searchable_attributes)
                .await?,
            self.put_setting("sortable-attributes", &settings.sortable_attributes)
                .await?,
        ];

        Ok(tasks)
    }

    async fn add_documents(
        &self,
        documents: &[IndexDocument],
        primary_key: &str,
    ) -> Result<TaskHandle, SearchIndexError> {
        let mut url = self.index_endpoint("documents")?;
        url.query_pairs_mut().append_pair("primaryKey", primary_key);

        let body = serde_json::to_vec(documents)
            .map_err(|e| SearchIndexError::serialization(e.to_string()))?;

        let response = self
            .authorized(self.client.post(url))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::upload(e.to_string()))?;

        let response = Self::ensure_success(response, "add documents")
            .await
            .map_err(SearchIndexError::upload)?;

        let info: TaskInfo = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        debug!(
            count = documents.len(),
            task_uid = info.task_uid,
            "Document batch queued"
        );
        Ok(TaskHandle::new(info.task_uid))
    }

    async fn get_task(&self, task: TaskHandle) -> Result<TaskSnapshot, SearchIndexError> {
        let url = self.endpoint(&format!("tasks/{}", task.uid))?;

        let response = self
            .authorized(self.client.get(url))
            .send()
            .await
            .map_err(|e| SearchIndexError::task_query(e.to_string()))?;

        let response = Self::ensure_success(response, "get task")
            .await
            .map_err(SearchIndexError::task_query)?;

        let body: Task = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        if let Some(ref err) = body.error {
            debug!(
                task_uid = body.uid,
                code = err.code.as_deref().unwrap_or("unknown"),
                message = %err.message,
                "Task reported an error"
            );
        }

        Ok(TaskSnapshot {
            uid: body.uid,
            status: body.status,
            error: body.error.map(|e| e.message),
        })
    }

    async fn document_count(&self) -> Result<u64, SearchIndexError> {
        let response = self
            .authorized(self.client.get(self.index_endpoint("stats")?))
            .send()
            .await
            .map_err(|e| SearchIndexError::stats(e.to_string()))?;

        let response = Self::ensure_success(response, "index stats")
            .await
            .map_err(SearchIndexError::stats)?;

        let stats: IndexStats = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Ok(stats.number_of_documents)
    }
}
