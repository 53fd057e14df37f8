use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};

use crate::application::ports::{
    BlockSplitter, DocumentStore, PdfSource, TextExtractor, TextGenerator,
};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct ProcessRequest {
    pub url: Option<String>,
    pub block_size: Option<usize>,
}

#[derive(Serialize)]
pub struct ProcessResponse {
    pub segments: usize,
    pub message: String,
}

/// Returns only the segment count. Segment contents are discarded by
/// design; a later generate call re-derives them from a fresh download.
#[tracing::instrument(skip(state, request))]
pub async fn process_pdf_handler<S, P, E, B, G>(
    State(state): State<AppState<S, P, E, B, G>>,
    Json(request): Json<ProcessRequest>,
) -> impl IntoResponse
where
    S: DocumentStore + ?Sized + 'static,
    P: PdfSource + 'static,
    E: TextExtractor + 'static,
    B: BlockSplitter + 'static,
    G: TextGenerator + ?Sized + 'static,
{
    let Some(url) = request.url else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Missing required parameter: 'url'".to_string(),
            }),
        )
            .into_response();
    };

    match state
        .segmentation_service
        .segment(&url, request.block_size)
        .await
    {
        Ok(segments) => (
            StatusCode::OK,
            Json(ProcessResponse {
                segments: segments.len(),
                message: "PDF processed successfully.".to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "PDF processing failed");
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
