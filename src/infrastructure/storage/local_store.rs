use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::ObjectKey;

/// Filesystem-backed store for local development and integration tests.
pub struct LocalDocumentStore {
    inner: Arc<LocalFileSystem>,
    base_path: PathBuf,
}

impl LocalDocumentStore {
    pub fn new(base_path: PathBuf) -> Result<Self, DocumentStoreError> {
        std::fs::create_dir_all(&base_path).map_err(DocumentStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            inner: Arc::new(fs),
            base_path,
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for LocalDocumentStore {
    async fn store(
        &self,
        key: &ObjectKey,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, DocumentStoreError> {
        let store_path = StorePath::from(key.as_str());
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(DocumentStoreError::Io(e));
                }
            };
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(DocumentStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    async fn fetch(&self, key: &ObjectKey) -> Result<Vec<u8>, DocumentStoreError> {
        let store_path = StorePath::from(key.as_str());
        let result = self
            .inner
            .get(&store_path)
            .await
            .map_err(|e| DocumentStoreError::NotFound(e.to_string()))?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| DocumentStoreError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, key: &ObjectKey) -> Result<(), DocumentStoreError> {
        let store_path = StorePath::from(key.as_str());
        self.inner
            .delete(&store_path)
            .await
            .map_err(|e| DocumentStoreError::DeleteFailed(e.to_string()))
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!(
            "file://{}/{}",
            self.base_path.display(),
            key.as_str()
        )
    }
}
