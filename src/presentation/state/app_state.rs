use std::sync::Arc;

use crate::application::ports::{
    BlockSplitter, DocumentStore, PdfSource, TextExtractor, TextGenerator,
};
use crate::application::services::{GenerationService, SegmentationService, UploadService};

pub struct AppState<S, P, E, B, G>
where
    S: DocumentStore + ?Sized,
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
    G: TextGenerator + ?Sized,
{
    pub upload_service: Arc<UploadService<S>>,
    pub segmentation_service: Arc<SegmentationService<P, E, B>>,
    pub generation_service: Arc<GenerationService<P, E, B, G>>,
    pub default_max_length: usize,
    pub default_top_k: usize,
}

impl<S, P, E, B, G> Clone for AppState<S, P, E, B, G>
where
    S: DocumentStore + ?Sized,
    P: PdfSource,
    E: TextExtractor,
    B: BlockSplitter,
    G: TextGenerator + ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            upload_service: Arc::clone(&self.upload_service),
            segmentation_service: Arc::clone(&self.segmentation_service),
            generation_service: Arc::clone(&self.generation_service),
            default_max_length: self.default_max_length,
            default_top_k: self.default_top_k,
        }
    }
}
