//! Meilisearch index settings.
//!
//! This module defines the name, primary key and attribute settings of the
//! document search index.

use search_reindexer_shared::IndexDocument;

/// The default name of the search index.
pub const DEFAULT_INDEX_NAME: &str = "documents";

/// Settings for the search index.
///
/// The attribute lists mirror how the index is queried: results are filtered by
/// access level, owner and tags, matched against title, preview, slug and tags,
/// and sorted by last update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSettings {
    /// The index uid.
    pub index_name: String,
    /// The unique key field of every document.
    pub primary_key: String,
    pub filterable_attributes: Vec<String>,
    pub searchable_attributes: Vec<String>,
    pub sortable_attributes: Vec<String>,
}

impl IndexSettings {
    /// Create settings for the named index with the default attribute lists.
    ///
    /// # Arguments
    ///
    /// * `index_name` - The index uid
    pub fn new(index_name: impl Into<String>) -> Self {
        Self {
            index_name: index_name.into(),
            primary_key: IndexDocument::PRIMARY_KEY.to_string(),
            filterable_attributes: to_strings(&["access_level", "service_owner", "tags"]),
            searchable_attributes: to_strings(&["title", "content_preview", "slug", "tags"]),
            sortable_attributes: to_strings(&["last_updated"]),
        }
    }
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self::new(DEFAULT_INDEX_NAME)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = IndexSettings::default();

        assert_eq!(settings.index_name, "documents");
        assert_eq!(settings.primary_key, "slug");
        assert_eq!(
            settings.filterable_attributes,
            vec!["access_level", "service_owner", "tags"]
        );
        assert_eq!(
            settings.searchable_attributes,
            vec!["title", "content_preview", "slug", "tags"]
        );
        assert_eq!(settings.sortable_attributes, vec!["last_updated"]);
    }

    #[test]
    fn test_custom_index_name_keeps_attributes() {
        let settings = IndexSettings::new("docs_staging");

        assert_eq!(settings.index_name, "docs_staging");
        assert_eq!(settings.sortable_attributes, IndexSettings::default().sortable_attributes);
    }
}
