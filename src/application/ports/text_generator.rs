use async_trait::async_trait;

use crate::domain::GenerationParams;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produces one continuation of `prompt`. The returned text contains the
    /// prompt followed by the generated tokens, decoded as a whole.
    ///
    /// Blocks for the full generation duration. There is no cancellation,
    /// streaming, or batching.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, TextGeneratorError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TextGeneratorError {
    #[error("model load failed: {0}")]
    ModelLoadFailed(String),
    #[error("tokenization failed: {0}")]
    TokenizationFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
}
