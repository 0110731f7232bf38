//! Source record types.
//!
//! A [`SourceRecord`] is a document as it was read from the document store.
//! Every field is optional: the store is not trusted to be well formed, and
//! defaulting is the field mapper's job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The last-updated value of a source record.
///
/// The document store holds this field in more than one representation, so
/// it is decoded into a tagged variant at the read boundary and reduced to
/// epoch seconds in exactly one place, [`LastUpdated::epoch_seconds`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LastUpdated {
    /// A structured instant.
    Instant(DateTime<Utc>),
    /// A raw number, interpreted as seconds since the Unix epoch.
    RawEpoch(i64),
    /// Absent or not convertible.
    #[default]
    Missing,
}

impl LastUpdated {
    /// Integer epoch seconds, `0` when missing.
    pub fn epoch_seconds(&self) -> i64 {
        match self {
            LastUpdated::Instant(instant) => instant.timestamp(),
            LastUpdated::RawEpoch(seconds) => *seconds,
            LastUpdated::Missing => 0,
        }
    }

    /// Whether a usable value was present.
    pub fn is_missing(&self) -> bool {
        matches!(self, LastUpdated::Missing)
    }
}

/// A document record read from the document store.
///
/// # Fields
///
/// - `slug`: Unique, human-readable identifier (the index primary key)
/// - `title`: Human-readable title
/// - `access_level`: Access-level label, e.g. `"Developer"`
/// - `service_owner`: The team or service that owns the document
/// - `tags`: Free-text tags
/// - `last_updated`: When the document last changed
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SourceRecord {
    pub slug: Option<String>,
    pub title: Option<String>,
    pub access_level: Option<String>,
    pub service_owner: Option<String>,
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub last_updated: LastUpdated,
}

impl SourceRecord {
    /// Create a record with the given slug and title and nothing else.
    ///
    /// # Example
    ///
    /// ```
    /// use search_reindexer_shared::SourceRecord;
    ///
    /// let record = SourceRecord::new("engineering/deploy", "Deployment Guide");
    /// assert_eq!(record.slug.as_deref(), Some("engineering/deploy"));
    /// assert!(record.tags.is_none());
    /// ```
    pub fn new(slug: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            slug: Some(slug.into()),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Slug for log lines, `"<missing>"` when absent.
    pub fn display_slug(&self) -> &str {
        self.slug.as_deref().unwrap_or("<missing>")
    }
}
