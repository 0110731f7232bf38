use thiserror::Error;

#[derive(Debug, Clone, Error)]
/// Represents errors that can occur while reading from the document store.
pub enum DocumentStoreError {
    /// The store could not be reached or refused the connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// A query or cursor operation failed.
    #[error("Query error: {0}")]
    QueryError(String),
}

impl DocumentStoreError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }
}

impl From<mongodb::error::Error> for DocumentStoreError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::QueryError(err.to_string())
    }
}
