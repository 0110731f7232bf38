//! MongoDB document store implementation.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use search_reindexer_shared::SourceRecord;

use crate::errors::DocumentStoreError;
use crate::interfaces::DocumentStore;
use crate::mongo::decode::source_record_from_document;

/// MongoDB-backed document store.
///
/// Reads the collection as raw BSON documents so that heterogeneous or
/// malformed fields degrade to absent values instead of failing the read.
pub struct MongoDocumentStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoDocumentStore {
    /// Creates a store over `database.collection` on the server at `uri`.
    ///
    /// Client construction does not contact the server; call
    /// [`DocumentStore::ping`] to verify connectivity.
    ///
    /// # Arguments
    ///
    /// * `uri` - MongoDB connection string
    /// * `database` - Database name
    /// * `collection` - Collection holding the source records
    ///
    /// # Returns
    ///
    /// * `Ok(MongoDocumentStore)` - Ready-to-use store
    /// * `Err(DocumentStoreError)` - If the connection string is invalid
    pub async fn connect(
        uri: &str,
        database: &str,
        collection: &str,
    ) -> Result<Self, DocumentStoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| DocumentStoreError::connection(e.to_string()))?;

        let database = client.database(database);
        let collection = database.collection::<Document>(collection);

        info!(
            database = %database.name(),
            collection = %collection.name(),
            "Created MongoDB document store"
        );

        Ok(Self {
            database,
            collection,
        })
    }
}

#[async_trait]
impl DocumentStore for MongoDocumentStore {
    async fn ping(&self) -> Result<(), DocumentStoreError> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| DocumentStoreError::connection(e.to_string()))?;
        Ok(())
    }

    async fn count(&self) -> Result<u64, DocumentStoreError> {
        Ok(self.collection.count_documents(doc! {}).await?)
    }

    async fn fetch_all(&self) -> Result<Vec<SourceRecord>, DocumentStoreError> {
        let mut cursor = self.collection.find(doc! {}).await?;
        let mut records = Vec::new();

        while let Some(document) = cursor.try_next().await? {
            records.push(source_record_from_document(&document));
        }

        debug!(count = records.len(), "Fetched source records");
        Ok(records)
    }
}
