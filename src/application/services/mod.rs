mod generation_service;
mod segmentation_service;
mod upload_service;

pub use generation_service::{GenerationError, GenerationRequest, GenerationService};
pub use segmentation_service::{SegmentationError, SegmentationService};
pub use upload_service::{UploadError, UploadService};
