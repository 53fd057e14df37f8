use async_trait::async_trait;

#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extracts the text of every page in document order and returns the
    /// concatenation. Pages without extractable text (scanned images)
    /// contribute nothing; an empty string is a valid result.
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextExtractorError {
    #[error("not a parseable PDF: {0}")]
    InvalidDocument(String),
    #[error("extraction failed: {0}")]
    ExtractionFailed(String),
}
