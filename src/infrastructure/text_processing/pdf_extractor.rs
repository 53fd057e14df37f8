use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use pdf_oxide::PdfDocument;

use crate::application::ports::{TextExtractor, TextExtractorError};

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// pdf_oxide-backed text extraction.
///
/// The parser wants a file path, so the bytes land in a per-request
/// `NamedTempFile` that RAII removes on every exit path, including parse
/// failures. Pages that carry no extractable text (scanned images) simply
/// contribute nothing to the output.
#[derive(Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }

    fn extract_all_pages(path: &std::path::Path) -> Result<String, TextExtractorError> {
        let mut doc = PdfDocument::open(path)
            .map_err(|e| TextExtractorError::InvalidDocument(e.to_string()))?;

        let page_count = doc.page_count().map_err(|e| {
            TextExtractorError::ExtractionFailed(format!("failed to read page count: {e}"))
        })?;

        let mut text = String::new();
        for page_index in 0..page_count {
            text.push_str(&doc.extract_text(page_index).unwrap_or_default());
        }

        Ok(text)
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    #[tracing::instrument(skip(self, data), fields(bytes = data.len()))]
    async fn extract_text(&self, data: &[u8]) -> Result<String, TextExtractorError> {
        let mut temp_file = tempfile::NamedTempFile::new().map_err(|e| {
            TextExtractorError::ExtractionFailed(format!("failed to create temp file: {e}"))
        })?;

        temp_file.write_all(data).map_err(|e| {
            TextExtractorError::ExtractionFailed(format!("failed to write temp file: {e}"))
        })?;

        let temp_path = temp_file.path().to_path_buf();

        let text = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_all_pages(&temp_path)),
        )
        .await
        .map_err(|_| TextExtractorError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| TextExtractorError::ExtractionFailed(format!("task join error: {e}")))??;

        tracing::info!(chars = text.chars().count(), "PDF text extraction complete");

        Ok(text)
    }
}
