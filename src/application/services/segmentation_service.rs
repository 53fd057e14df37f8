use std::sync::Arc;

use crate::application::ports::{
    BlockSplitter, BlockSplitterError, PdfSource, PdfSourceError, TextExtractor,
    TextExtractorError,
};
use crate::domain::Segment;

/// Fetches a PDF by URL, extracts its text, and slices it into fixed-size
/// blocks. Both the process and generate endpoints run through here; the
/// segment list is recomputed from a live download on every call.
pub struct SegmentationService<P, E, B>
where
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
{
    source: Arc<P>,
    extractor: Arc<E>,
    splitter: Arc<B>,
    default_block_size: usize,
}

impl<P, E, B> SegmentationService<P, E, B>
where
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
{
    pub fn new(
        source: Arc<P>,
        extractor: Arc<E>,
        splitter: Arc<B>,
        default_block_size: usize,
    ) -> Self {
        Self {
            source,
            extractor,
            splitter,
            default_block_size,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn segment(
        &self,
        url: &str,
        block_size: Option<usize>,
    ) -> Result<Vec<Segment>, SegmentationError> {
        let block_size = block_size.unwrap_or(self.default_block_size);

        let data = self.source.fetch(url).await?;
        tracing::debug!(bytes = data.len(), "PDF downloaded");

        let text = self.extractor.extract_text(&data).await?;
        let segments = self.splitter.split(&text, block_size).await?;

        tracing::info!(
            chars = text.chars().count(),
            block_size,
            segments = segments.len(),
            "PDF segmented"
        );

        Ok(segments)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SegmentationError {
    #[error("error downloading PDF: {0}")]
    Fetch(#[from] PdfSourceError),
    #[error("error extracting text from PDF: {0}")]
    Extract(#[from] TextExtractorError),
    #[error("error segmenting text: {0}")]
    Split(#[from] BlockSplitterError),
}
