use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    BlockSplitter, DocumentStore, PdfSource, TextExtractor, TextGenerator,
};
use crate::application::services::{GenerationError, GenerationRequest};
use crate::domain::GenerationParams;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct GenerateRequest {
    pub url: Option<String>,
    pub prompt: Option<String>,
    pub segment_index: Option<i64>,
    pub block_size: Option<usize>,
    pub max_length: Option<usize>,
    pub top_k: Option<usize>,
    pub seed: Option<u64>,
    pub greedy: Option<bool>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub generated_text: String,
}

#[tracing::instrument(skip(state, request))]
pub async fn generate_text_handler<S, P, E, B, G>(
    State(state): State<AppState<S, P, E, B, G>>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse
where
    S: DocumentStore + ?Sized + 'static,
    P: PdfSource + 'static,
    E: TextExtractor + 'static,
    B: BlockSplitter + 'static,
    G: TextGenerator + ?Sized + 'static,
{
    let (Some(url), Some(prompt), Some(segment_index)) =
        (request.url, request.prompt, request.segment_index)
    else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required parameters: 'url', 'prompt', and 'segment_index'"
                    .to_string(),
            }),
        )
            .into_response();
    };

    tracing::debug!(prompt = %sanitize_prompt(&prompt), segment_index, "Processing generation request");

    let params = GenerationParams {
        max_length: request.max_length.unwrap_or(state.default_max_length),
        top_k: request.top_k.unwrap_or(state.default_top_k),
        seed: request.seed.unwrap_or_else(rand::random),
        greedy: request.greedy.unwrap_or(false),
    };

    let result = state
        .generation_service
        .generate(GenerationRequest {
            url: &url,
            prompt: &prompt,
            segment_index,
            block_size: request.block_size,
            params,
        })
        .await;

    match result {
        Ok(generated_text) => {
            (StatusCode::OK, Json(GenerateResponse { generated_text })).into_response()
        }
        Err(e @ GenerationError::SegmentIndexOutOfRange { .. }) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Text generation failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
