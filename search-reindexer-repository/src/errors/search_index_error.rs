//! Search index error types.
//!
//! This module defines the unified error type for all search index operations,
//! from transport failures to responses the engine rejected.

use thiserror::Error;

/// Unified errors from search index operations.
///
/// Used by the `SearchIndexProvider` trait for every call the reindexer makes
/// to the search engine.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to reach the search engine, or it reported itself unavailable.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to apply index settings.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The engine rejected a document batch before queueing it.
    #[error("Upload error: {0}")]
    UploadError(String),

    /// Failed to query the status of a task.
    #[error("Task query error: {0}")]
    TaskQueryError(String),

    /// Failed to read index statistics.
    #[error("Stats error: {0}")]
    StatsError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Failed to serialize data for the search engine.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Unknown error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::ConfigurationError(msg.into())
    }

    /// Create an upload error.
    pub fn upload(msg: impl Into<String>) -> Self {
        Self::UploadError(msg.into())
    }

    /// Create a task query error.
    pub fn task_query(msg: impl Into<String>) -> Self {
        Self::TaskQueryError(msg.into())
    }

    /// Create a stats error.
    pub fn stats(msg: impl Into<String>) -> Self {
        Self::StatsError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::SerializationError(msg.into())
    }

    /// Create an unknown error.
    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::Unknown(msg.into())
    }
}
