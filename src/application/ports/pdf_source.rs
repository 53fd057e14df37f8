use async_trait::async_trait;
use bytes::Bytes;

#[async_trait]
pub trait PdfSource: Send + Sync {
    /// Downloads the document at `url` and returns its raw bytes.
    async fn fetch(&self, url: &str) -> Result<Bytes, PdfSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PdfSourceError {
    #[error("request to {url} failed: {reason}")]
    RequestFailed { url: String, reason: String },
    #[error("unexpected status {status} from {url}")]
    BadStatus { url: String, status: u16 },
}
