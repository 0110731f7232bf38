//! Error types for the reindex pipeline.

use std::time::Duration;

use thiserror::Error;

use search_reindexer_repository::{DocumentStoreError, SearchIndexError};

/// Errors that abort a reindex run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The document store returned no records. Nothing is uploaded, so a
    /// populated index is never replaced by an empty one.
    #[error("Empty source: the document store returned no records")]
    EmptySource,

    /// Reading from the document store failed.
    #[error("Store error: {0}")]
    StoreError(#[from] DocumentStoreError),

    /// The batch was not accepted by the search engine.
    #[error("Upload error: {0}")]
    UploadError(#[from] UploadError),

    /// The indexing task reached a terminal failure state.
    #[error("Task {task_uid} failed: {detail}")]
    TaskFailure { task_uid: u64, detail: String },

    /// The indexing task did not finish within the wait policy's bounds.
    #[error("Task {task_uid} still pending after {polls} polls ({elapsed:?})")]
    Timeout {
        task_uid: u64,
        polls: u32,
        elapsed: Duration,
    },

    /// The task status could not be queried.
    #[error("Task query error: {0}")]
    TaskQueryError(SearchIndexError),
}

/// Errors from submitting a batch.
#[derive(Error, Debug)]
pub enum UploadError {
    /// Refused locally: there is nothing to upload.
    #[error("Refusing to upload an empty batch")]
    EmptyBatch,

    /// Refused locally: the batch is larger than the configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// The search engine rejected the request.
    #[error(transparent)]
    Provider(#[from] SearchIndexError),
}

/// Errors from waiting on an indexing task.
#[derive(Error, Debug)]
pub enum WaitError {
    /// The task ended in `failed` or `canceled`.
    #[error("Task {task_uid} failed: {detail}")]
    Failed { task_uid: u64, detail: String },

    /// A wait bound was hit before the task reached a terminal state.
    #[error("Task {task_uid} still pending after {polls} polls ({elapsed:?})")]
    Timeout {
        task_uid: u64,
        polls: u32,
        elapsed: Duration,
    },

    /// A status query failed.
    #[error("Task query error: {0}")]
    Query(#[from] SearchIndexError),
}

impl From<WaitError> for PipelineError {
    fn from(err: WaitError) -> Self {
        match err {
            WaitError::Failed { task_uid, detail } => PipelineError::TaskFailure { task_uid, detail },
            WaitError::Timeout {
                task_uid,
                polls,
                elapsed,
            } => PipelineError::Timeout {
                task_uid,
                polls,
                elapsed,
            },
            WaitError::Query(e) => PipelineError::TaskQueryError(e),
        }
    }
}
