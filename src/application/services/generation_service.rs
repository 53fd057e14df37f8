use std::sync::Arc;

use crate::application::ports::{
    BlockSplitter, PdfSource, TextExtractor, TextGenerator, TextGeneratorError,
};
use crate::application::services::{SegmentationError, SegmentationService};
use crate::domain::GenerationParams;

pub struct GenerationRequest<'a> {
    pub url: &'a str,
    pub prompt: &'a str,
    // Signed so a client-supplied negative index reaches the range check
    // instead of failing deserialization.
    pub segment_index: i64,
    pub block_size: Option<usize>,
    pub params: GenerationParams,
}

/// Re-segments the referenced PDF, validates the segment index, and feeds the
/// combined prompt into the generation pipeline.
pub struct GenerationService<P, E, B, G: ?Sized>
where
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
    G: TextGenerator,
{
    segmentation: Arc<SegmentationService<P, E, B>>,
    generator: Arc<G>,
}

impl<P, E, B, G: ?Sized> GenerationService<P, E, B, G>
where
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
    G: TextGenerator,
{
    pub fn new(segmentation: Arc<SegmentationService<P, E, B>>, generator: Arc<G>) -> Self {
        Self {
            segmentation,
            generator,
        }
    }

    #[tracing::instrument(skip(self, request), fields(segment_index = request.segment_index))]
    pub async fn generate(&self, request: GenerationRequest<'_>) -> Result<String, GenerationError> {
        let segments = self
            .segmentation
            .segment(request.url, request.block_size)
            .await?;

        let segment = usize::try_from(request.segment_index)
            .ok()
            .and_then(|index| segments.get(index))
            .ok_or(GenerationError::SegmentIndexOutOfRange {
                index: request.segment_index,
                segment_count: segments.len(),
            })?;

        let combined_prompt = format!("{}\n\n{}", request.prompt, segment.text);

        tracing::debug!(
            prompt_chars = combined_prompt.chars().count(),
            "Invoking generation pipeline"
        );

        let generated = self
            .generator
            .generate(&combined_prompt, &request.params)
            .await?;

        tracing::info!(chars = generated.chars().count(), "Text generated");

        Ok(generated)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("segment index {index} out of range. Total segments: {segment_count}")]
    SegmentIndexOutOfRange { index: i64, segment_count: usize },
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
    #[error(transparent)]
    Generator(#[from] TextGeneratorError),
}
