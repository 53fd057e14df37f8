use crate::application::ports::{DocumentStore, DocumentStoreError};
use crate::domain::ObjectKey;

pub struct MockDocumentStore;

#[async_trait::async_trait]
impl DocumentStore for MockDocumentStore {
    async fn store(
        &self,
        _key: &ObjectKey,
        _stream: futures::stream::BoxStream<'_, Result<bytes::Bytes, std::io::Error>>,
    ) -> Result<u64, DocumentStoreError> {
        Ok(0)
    }

    async fn fetch(&self, _key: &ObjectKey) -> Result<Vec<u8>, DocumentStoreError> {
        Ok(vec![])
    }

    async fn delete(&self, _key: &ObjectKey) -> Result<(), DocumentStoreError> {
        Ok(())
    }

    fn public_url(&self, key: &ObjectKey) -> String {
        format!("mock://{}", key.as_str())
    }
}
