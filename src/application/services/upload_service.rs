use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::ObjectKey;

pub struct UploadService<S: ?Sized>
where
    S: DocumentStore,
{
    store: Arc<S>,
}

impl<S: ?Sized> UploadService<S>
where
    S: DocumentStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Streams an uploaded file into object storage under its filename and
    /// returns the public URL. The caller has already rejected empty
    /// filenames; a key that sanitizes to empty is still refused here.
    pub async fn upload(
        &self,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<String, UploadError> {
        let key = ObjectKey::from_filename(filename);
        if key.is_empty() {
            return Err(UploadError::EmptyFilename);
        }

        let bytes_stored = self.store.store(&key, stream).await?;
        let url = self.store.public_url(&key);

        tracing::info!(key = %key, bytes = bytes_stored, "File uploaded to object storage");

        Ok(url)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("empty filename")]
    EmptyFilename,
    #[error(transparent)]
    Store(#[from] DocumentStoreError),
}
