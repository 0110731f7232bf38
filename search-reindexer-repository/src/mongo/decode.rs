//! BSON decoding of source records.
//!
//! Decoding never fails: a field with an unexpected type is treated as absent
//! and left for the field mapper to default.

use chrono::{DateTime, Utc};
use mongodb::bson::{Bson, Document};
use search_reindexer_shared::{LastUpdated, SourceRecord};

/// Decode a raw collection document into a [`SourceRecord`].
pub fn source_record_from_document(document: &Document) -> SourceRecord {
    SourceRecord {
        slug: string_field(document, "slug"),
        title: string_field(document, "title"),
        access_level: string_field(document, "access_level"),
        service_owner: string_field(document, "service_owner"),
        tags: tags_field(document),
        last_updated: last_updated_field(document.get("last_updated")),
    }
}

fn string_field(document: &Document, key: &str) -> Option<String> {
    match document.get(key) {
        Some(Bson::String(value)) => Some(value.clone()),
        _ => None,
    }
}

fn tags_field(document: &Document) -> Option<Vec<String>> {
    match document.get("tags") {
        Some(Bson::Array(values)) => Some(
            values
                .iter()
                .filter_map(|value| match value {
                    Bson::String(tag) => Some(tag.clone()),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    }
}

fn last_updated_field(value: Option<&Bson>) -> LastUpdated {
    match value {
        Some(Bson::DateTime(instant)) => instant_from_millis(instant.timestamp_millis()),
        Some(Bson::Timestamp(ts)) => DateTime::<Utc>::from_timestamp(i64::from(ts.time), 0)
            .map(LastUpdated::Instant)
            .unwrap_or(LastUpdated::Missing),
        Some(Bson::Int32(seconds)) => LastUpdated::RawEpoch(i64::from(*seconds)),
        Some(Bson::Int64(seconds)) => LastUpdated::RawEpoch(*seconds),
        Some(Bson::Double(seconds)) if seconds.is_finite() => {
            LastUpdated::RawEpoch(seconds.trunc() as i64)
        }
        Some(Bson::String(text)) => DateTime::parse_from_rfc3339(text)
            .map(|instant| LastUpdated::Instant(instant.with_timezone(&Utc)))
            .unwrap_or(LastUpdated::Missing),
        _ => LastUpdated::Missing,
    }
}

fn instant_from_millis(millis: i64) -> LastUpdated {
    DateTime::<Utc>::from_timestamp_millis(millis)
        .map(LastUpdated::Instant)
        .unwrap_or(LastUpdated::Missing)
}
