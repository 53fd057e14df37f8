mod fixed_block_splitter;
mod pdf_extractor;

pub use fixed_block_splitter::FixedBlockSplitter;
pub use pdf_extractor::PdfTextExtractor;
