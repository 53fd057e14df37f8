mod block_splitter;
mod document_store;
mod pdf_source;
mod text_extractor;
mod text_generator;

pub use block_splitter::{BlockSplitter, BlockSplitterError};
pub use document_store::{DocumentStore, DocumentStoreError};
pub use pdf_source::{PdfSource, PdfSourceError};
pub use text_extractor::{TextExtractor, TextExtractorError};
pub use text_generator::{TextGenerator, TextGeneratorError};
