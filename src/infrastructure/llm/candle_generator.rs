use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::generation::{LogitsProcessor, Sampling};
use candle_transformers::models::llama::{Cache, Config, Llama, LlamaConfig, LlamaEosToks};
use tokenizers::Tokenizer;

use crate::application::ports::{TextGenerator, TextGeneratorError};
use crate::domain::GenerationParams;

/// Candle-backed causal-LM pipeline.
///
/// Tokenizer, config, and weights are loaded once from the model directory
/// and shared read-only across requests. Each generate call builds its own
/// KV cache, so concurrent calls do not interfere; the forward loop runs on
/// a blocking task for its full duration.
pub struct CandleTextGenerator {
    model: Arc<Llama>,
    tokenizer: Arc<Tokenizer>,
    config: Config,
    device: Device,
    dtype: DType,
    eos_tokens: Vec<u32>,
}

impl CandleTextGenerator {
    pub fn new(model_dir: &Path) -> Result<Self, TextGeneratorError> {
        let device = Self::select_device();
        let dtype = Self::select_dtype(&device);

        tracing::info!(
            device = ?device,
            model_dir = %model_dir.display(),
            "Initializing Candle text-generation pipeline"
        );

        let config_contents = std::fs::read_to_string(model_dir.join("config.json"))
            .map_err(|e| TextGeneratorError::ModelLoadFailed(format!("config.json: {e}")))?;
        let config: LlamaConfig = serde_json::from_str(&config_contents)
            .map_err(|e| TextGeneratorError::ModelLoadFailed(format!("parse config: {e}")))?;
        let config = config.into_config(false);

        let tokenizer = Tokenizer::from_file(model_dir.join("tokenizer.json"))
            .map_err(|e| TextGeneratorError::ModelLoadFailed(format!("tokenizer: {e}")))?;

        let weights_path = model_dir.join("model.safetensors");

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| TextGeneratorError::ModelLoadFailed(format!("weights: {e}")))?
        };

        let model = Llama::load(vb, &config)
            .map_err(|e| TextGeneratorError::ModelLoadFailed(format!("model: {e}")))?;

        let eos_tokens = match &config.eos_token_id {
            Some(LlamaEosToks::Single(id)) => vec![*id],
            Some(LlamaEosToks::Multiple(ids)) => ids.clone(),
            None => Vec::new(),
        };
        if eos_tokens.is_empty() {
            tracing::warn!("Model config declares no EOS token; generation stops at max_length only");
        }

        tracing::info!("Candle text-generation pipeline loaded successfully");

        Ok(Self {
            model: Arc::new(model),
            tokenizer: Arc::new(tokenizer),
            config,
            device,
            dtype,
            eos_tokens,
        })
    }

    fn select_device() -> Device {
        Device::cuda_if_available(0).unwrap_or(Device::Cpu)
    }

    fn select_dtype(device: &Device) -> DType {
        if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        }
    }
}

#[async_trait]
impl TextGenerator for CandleTextGenerator {
    #[tracing::instrument(skip(self, prompt))]
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, TextGeneratorError> {
        let model = Arc::clone(&self.model);
        let tokenizer = Arc::clone(&self.tokenizer);
        let config = self.config.clone();
        let device = self.device.clone();
        let dtype = self.dtype;
        let eos_tokens = self.eos_tokens.clone();
        let prompt = prompt.to_string();
        let params = *params;

        tokio::task::spawn_blocking(move || {
            generate_blocking(
                &model, &tokenizer, &config, &device, dtype, &eos_tokens, &prompt, &params,
            )
        })
        .await
        .map_err(|e| TextGeneratorError::InferenceFailed(format!("task join error: {e}")))?
    }
}

#[allow(clippy::too_many_arguments)]
fn generate_blocking(
    model: &Llama,
    tokenizer: &Tokenizer,
    config: &Config,
    device: &Device,
    dtype: DType,
    eos_tokens: &[u32],
    prompt: &str,
    params: &GenerationParams,
) -> Result<String, TextGeneratorError> {
    let encoding = tokenizer
        .encode(prompt, true)
        .map_err(|e| TextGeneratorError::TokenizationFailed(e.to_string()))?;

    let mut tokens: Vec<u32> = encoding.get_ids().to_vec();
    let prompt_tokens = tokens.len();

    // max_length is the total budget, prompt included (HF pipeline semantics).
    let max_new_tokens = params.max_length.saturating_sub(prompt_tokens);

    let sampling = if params.greedy {
        Sampling::ArgMax
    } else {
        Sampling::TopK {
            k: params.top_k,
            temperature: 1.0,
        }
    };
    let mut logits_processor = LogitsProcessor::from_sampling(params.seed, sampling);

    let mut cache = Cache::new(true, dtype, config, device)
        .map_err(|e| TextGeneratorError::InferenceFailed(format!("kv cache: {e}")))?;

    let mut index_pos = 0;
    for index in 0..max_new_tokens {
        let (context_size, context_index) = if index > 0 {
            (1, index_pos)
        } else {
            (tokens.len(), 0)
        };

        let ctxt = &tokens[tokens.len() - context_size..];
        let input = Tensor::new(ctxt, device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| TextGeneratorError::InferenceFailed(format!("input tensor: {e}")))?;

        let logits = model
            .forward(&input, context_index, &mut cache)
            .map_err(|e| TextGeneratorError::InferenceFailed(format!("forward: {e}")))?;
        let logits = logits
            .squeeze(0)
            .map_err(|e| TextGeneratorError::InferenceFailed(e.to_string()))?;

        index_pos += ctxt.len();

        let next_token = logits_processor
            .sample(&logits)
            .map_err(|e| TextGeneratorError::InferenceFailed(format!("sampling: {e}")))?;

        tokens.push(next_token);

        if eos_tokens.contains(&next_token) {
            break;
        }
    }

    tracing::debug!(
        prompt_tokens,
        generated_tokens = tokens.len() - prompt_tokens,
        "Generation loop finished"
    );

    // Decode the whole sequence so the response carries prompt + continuation.
    tokenizer
        .decode(&tokens, true)
        .map_err(|e| TextGeneratorError::InferenceFailed(format!("decode: {e}")))
}
