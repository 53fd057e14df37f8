mod generation;
mod object_key;
mod segment;

pub use generation::{DEFAULT_MAX_LENGTH, DEFAULT_TOP_K, GenerationParams};
pub use object_key::ObjectKey;
pub use segment::Segment;
