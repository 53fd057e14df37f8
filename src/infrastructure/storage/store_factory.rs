use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::presentation::config::{StorageProviderSetting, StorageSettings};

use super::local_store::LocalDocumentStore;
use super::s3_store::S3DocumentStore;

pub struct DocumentStoreFactory;

impl DocumentStoreFactory {
    pub fn create(settings: &StorageSettings) -> Result<Arc<dyn DocumentStore>, DocumentStoreError> {
        match settings.provider {
            StorageProviderSetting::Local => {
                let path = PathBuf::from(&settings.local_path);
                let store = LocalDocumentStore::new(path)?;
                Ok(Arc::new(store))
            }
            StorageProviderSetting::S3 => {
                let bucket = settings.s3_bucket.as_deref().ok_or_else(|| {
                    DocumentStoreError::Credentials("S3_BUCKET_NAME required".into())
                })?;
                let store = S3DocumentStore::new(
                    bucket,
                    &settings.s3_region,
                    settings.aws_access_key.as_deref().unwrap_or_default(),
                    settings.aws_secret_key.as_deref().unwrap_or_default(),
                )?;
                Ok(Arc::new(store))
            }
        }
    }
}
