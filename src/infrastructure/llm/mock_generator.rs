use async_trait::async_trait;

use crate::application::ports::{TextGenerator, TextGeneratorError};
use crate::domain::GenerationParams;

/// Deterministic stand-in for the Candle pipeline, used in tests and when
/// running the service without model weights.
pub struct MockTextGenerator;

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, TextGeneratorError> {
        let continuation = if params.greedy {
            " [mock continuation]"
        } else {
            " [mock sampled continuation]"
        };
        Ok(format!("{prompt}{continuation}"))
    }
}
