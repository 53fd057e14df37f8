mod local_store;
mod mock_store;
mod s3_store;
mod store_factory;

pub use local_store::LocalDocumentStore;
pub use mock_store::MockDocumentStore;
pub use s3_store::S3DocumentStore;
pub use store_factory::DocumentStoreFactory;
