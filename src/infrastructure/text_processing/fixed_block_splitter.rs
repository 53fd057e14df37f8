use async_trait::async_trait;

use crate::application::ports::{BlockSplitter, BlockSplitterError};
use crate::domain::Segment;

/// Consecutive fixed-size character blocks with no overlap and no
/// sentence-boundary awareness. For text of length L and block size B this
/// yields ceil(L/B) segments, all of length B except possibly the last.
#[derive(Default)]
pub struct FixedBlockSplitter;

impl FixedBlockSplitter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BlockSplitter for FixedBlockSplitter {
    async fn split(
        &self,
        text: &str,
        block_size: usize,
    ) -> Result<Vec<Segment>, BlockSplitterError> {
        if block_size == 0 {
            return Err(BlockSplitterError::InvalidBlockSize(block_size));
        }

        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();

        let mut segments = Vec::with_capacity(total_len.div_ceil(block_size));
        let mut offset = 0;

        while offset < total_len {
            let end = (offset + block_size).min(total_len);
            let block: String = chars[offset..end].iter().collect();
            segments.push(Segment::new(segments.len(), block));
            offset = end;
        }

        Ok(segments)
    }
}
