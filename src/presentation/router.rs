use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{
    BlockSplitter, DocumentStore, PdfSource, TextExtractor, TextGenerator,
};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    generate_text_handler, health_handler, process_pdf_handler, upload_pdf_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<S, P, E, B, G>(state: AppState<S, P, E, B, G>) -> Router
where
    S: DocumentStore + ?Sized + 'static,
    P: PdfSource + 'static,
    E: TextExtractor + 'static,
    B: BlockSplitter + 'static,
    G: TextGenerator + ?Sized + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/upload-pdf", post(upload_pdf_handler::<S, P, E, B, G>))
        .route("/process-pdf", post(process_pdf_handler::<S, P, E, B, G>))
        .route(
            "/generate-text",
            post(generate_text_handler::<S, P, E, B, G>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
