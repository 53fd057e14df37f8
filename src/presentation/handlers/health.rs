use axum::Json;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Liveness probe. The listener only binds after the model is loaded, so a
/// healthy answer here doubles as the readiness signal.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}
