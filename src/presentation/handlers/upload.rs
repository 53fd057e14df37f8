use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures::stream;
use serde::Serialize;

use crate::application::ports::{
    BlockSplitter, DocumentStore, PdfSource, TextExtractor, TextGenerator,
};
use crate::presentation::handlers::ErrorResponse;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_pdf_handler<S, P, E, B, G>(
    State(state): State<AppState<S, P, E, B, G>>,
    mut multipart: Multipart,
) -> impl IntoResponse
where
    S: DocumentStore + ?Sized + 'static,
    P: PdfSource + 'static,
    E: TextExtractor + 'static,
    B: BlockSplitter + 'static,
    G: TextGenerator + ?Sized + 'static,
{
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.name() == Some("file") => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Upload request with no file field");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: "No file provided".to_string(),
                    }),
                )
                    .into_response();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse {
                        error: format!("Failed to read multipart: {}", e),
                    }),
                )
                    .into_response();
            }
        }
    };

    let filename = field.file_name().unwrap_or_default().to_string();
    if filename.is_empty() {
        tracing::warn!("Upload request with empty filename");
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Empty filename".to_string(),
            }),
        )
            .into_response();
    }

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Failed to read file: {}", e),
                }),
            )
                .into_response();
        }
    };

    tracing::debug!(filename = %filename, bytes = data.len(), "File data received");

    let byte_stream = Box::pin(stream::iter([Ok(data)]));

    match state.upload_service.upload(&filename, byte_stream).await {
        Ok(url) => (
            StatusCode::OK,
            Json(UploadResponse {
                message: "File uploaded successfully.".to_string(),
                url,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Upload failed");
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
