use std::path::PathBuf;

use async_trait::async_trait;
use microgreens_core::error::CoreError;
use serde_json::Value;

/// Error type for persistence failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored bytes are not valid JSON, or the garden could not be encoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The stored document does not describe a garden.
    #[error("Stored document is invalid: {0}")]
    Document(#[from] CoreError),

    /// The backend refused the operation.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// A key-value document backend holding exactly one JSON document.
///
/// `save` replaces the whole document; there are no partial writes.
/// Implementations do not retry.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the stored document, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<Value>, StoreError>;

    /// Replace the stored document.
    async fn save(&self, document: &Value) -> Result<(), StoreError>;

    /// Cheap reachability probe used by the health endpoint.
    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
