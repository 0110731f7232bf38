//! Index document types for the search index.
//!
//! This module defines the document structure that is written to the search engine.

use serde::{Deserialize, Serialize};

/// Document representation for the search index.
///
/// This is a write-only projection of a source record, rebuilt from scratch on
/// every reindex. `slug` is the primary key: uploading a document whose slug
/// already exists replaces the stored document wholesale.
///
/// # Fields
///
/// - `slug`: Primary key, stable across reindexes
/// - `title`: Human-readable title
/// - `access_level`: Numeric access rank (Public=0, Developer=1, Architect=2, Admin=3)
/// - `service_owner`: The team or service that owns the document
/// - `tags`: Tags for filtering, order is not significant
/// - `content_preview`: Normalized, length-bounded text
/// - `last_updated`: Unix timestamp in seconds, `0` when unknown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexDocument {
    pub slug: String,
    pub title: String,
    pub access_level: i32,
    pub service_owner: String,
    pub tags: Vec<String>,
    pub content_preview: String,
    pub last_updated: i64,
}

impl IndexDocument {
    /// Name of the primary key field in the search index.
    pub const PRIMARY_KEY: &'static str = "slug";
}
