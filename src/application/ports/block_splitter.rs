use async_trait::async_trait;

use crate::domain::Segment;

#[async_trait]
pub trait BlockSplitter: Send + Sync {
    /// Slices `text` into consecutive blocks of at most `block_size`
    /// characters, in document order. The final block may be shorter.
    async fn split(&self, text: &str, block_size: usize)
        -> Result<Vec<Segment>, BlockSplitterError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BlockSplitterError {
    #[error("invalid block size: {0}")]
    InvalidBlockSize(usize),
}
