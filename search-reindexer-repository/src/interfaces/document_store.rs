use async_trait::async_trait;
use search_reindexer_shared::SourceRecord;

use crate::errors::DocumentStoreError;

/// Trait for reading source records from the authoritative document store.
///
/// The reindexer only ever reads. Both calls are unfiltered: the whole
/// collection is the unit of work.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Verify the store is reachable.
    async fn ping(&self) -> Result<(), DocumentStoreError>;

    /// Number of records currently in the store.
    async fn count(&self) -> Result<u64, DocumentStoreError>;

    /// Read every record in one bulk pass, in the store's iteration order.
    async fn fetch_all(&self) -> Result<Vec<SourceRecord>, DocumentStoreError>;
}
