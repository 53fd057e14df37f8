use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectStore, PutPayload};

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::ObjectKey;

pub struct S3DocumentStore {
    inner: Arc<dyn ObjectStore>,
    bucket: String,
    region: String,
}

impl S3DocumentStore {
    pub fn new(
        bucket: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
    ) -> Result<Self, DocumentStoreError> {
        if access_key.is_empty() || secret_key.is_empty() {
            return Err(DocumentStoreError::Credentials(
                "AWS access key and secret key are required".to_string(),
            ));
        }

        let store = AmazonS3Builder::new()
            .with_bucket_name(bucket)
            .with_region(region)
            .with_access_key_id(access_key)
            .with_secret_access_key(secret_key)
            .build()
            .map_err(|e| DocumentStoreError::Credentials(e.to_string()))?;

        Ok(Self {
            inner: Arc::new(store),
            bucket: bucket.to_string(),
            region: region.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl DocumentStore for S3DocumentStore {
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
            "https://{}.s3.{}.amazonaws.com/{}",
            self.bucket,
            self.region,
            key.as_str()
        )
    }
}
