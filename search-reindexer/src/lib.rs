//! # Search Reindexer
//!
//! Rebuilds the document search index from the document store - reads every
//! record from MongoDB and reindexes it into Meilisearch in a single batch.
//!
//! ## Architecture
//!
//! The reindexer follows a Fetch-Processor-Loader pattern:
//!
//! 1. **Store**: Reads every source record in one bulk pass
//! 2. **Processor**: Maps records into search documents
//! 3. **Loader**: Submits the batch as one upsert task
//! 4. **Waiter**: Polls the task until it is terminal
//! 5. **Orchestrator**: Runs the steps in order and verifies the result
//!
//! ## Modules
//!
//! - [`config`]: Configuration and dependency initialization
//! - [`processor`]: Markdown normalization and field mapping
//! - [`loader`]: Batch submission to Meilisearch
//! - [`waiter`]: Task completion polling
//! - [`orchestrator`]: Coordinates the reindex run
//! - [`errors`]: Error types for the pipeline

pub mod config;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod waiter;

pub use config::{Dependencies, ReindexConfig};
pub use errors::PipelineError;
pub use orchestrator::{PipelineWarning, ReindexSummary};

use thiserror::Error;

/// Errors that can occur during reindexer initialization or execution.
#[derive(Error, Debug)]
pub enum ReindexError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A collaborator could not be reached at startup.
    #[error("Connectivity error: {0}")]
    ConnectivityError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] PipelineError),
}

impl ReindexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connectivity error.
    pub fn connectivity(msg: impl Into<String>) -> Self {
        Self::ConnectivityError(msg.into())
    }
}
