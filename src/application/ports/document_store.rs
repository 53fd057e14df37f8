use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::ObjectKey;

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Streams the file's bytes to the backing store, overwriting any
    /// existing object under the same key. Returns the stored byte count.
    async fn store(
        &self,
        key: &ObjectKey,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, DocumentStoreError>;

    async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>, DocumentStoreError>;

    async fn delete(&self, key: &ObjectKey) -> Result<(), DocumentStoreError>;

    /// Deterministic public URL for a stored object, built from the store's
    /// configuration and the key alone. No existence check is performed.
    fn public_url(&self, key: &ObjectKey) -> String;
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("storage credentials not configured or invalid: {0}")]
    Credentials(String),
    #[error("upload failed: {0}")]
    UploadFailed(String),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
