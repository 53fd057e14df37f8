use std::path::PathBuf;
use std::sync::Arc;

use crate::application::ports::{TextGenerator, TextGeneratorError};
use crate::presentation::config::{GeneratorProviderSetting, ModelSettings};

use super::bootstrap::ensure_model;
use super::candle_generator::CandleTextGenerator;
use super::mock_generator::MockTextGenerator;

pub struct TextGeneratorFactory;

impl TextGeneratorFactory {
    /// Builds the configured generator. For the local provider this runs the
    /// model bootstrap (download + unpack when the directory is absent) and
    /// loads the weights before returning, so the caller can treat a
    /// successful return as the readiness signal.
    pub async fn create(
        settings: &ModelSettings,
    ) -> Result<Arc<dyn TextGenerator>, TextGeneratorError> {
        match settings.provider {
            GeneratorProviderSetting::Mock => Ok(Arc::new(MockTextGenerator)),
            GeneratorProviderSetting::Local => {
                let model_dir = PathBuf::from(&settings.model_dir);

                ensure_model(&model_dir, &settings.model_url)
                    .await
                    .map_err(|e| TextGeneratorError::ModelLoadFailed(e.to_string()))?;

                let generator =
                    tokio::task::spawn_blocking(move || CandleTextGenerator::new(&model_dir))
                        .await
                        .map_err(|e| {
                            TextGeneratorError::ModelLoadFailed(format!("task join error: {e}"))
                        })??;

                Ok(Arc::new(generator))
            }
        }
    }
}
