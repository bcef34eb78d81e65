use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    pub status: String,
}

pub fn router() -> Router {
    Router::new()
        .route("/health/live", get(handle_liveness))
        .route("/health/ready", get(handle_readiness))
}

async fn handle_liveness() -> (StatusCode, Json<ProbeResponse>) {
    (
        StatusCode::OK,
        Json(ProbeResponse {
            status: "alive".to_string(),
        }),
    )
}

async fn handle_readiness() -> (StatusCode, Json<ProbeResponse>) {
    // The worker is ready as soon as the process is up: cycle failures are
    // contained and do not make the replica unfit for the next trigger.
    (
        StatusCode::OK,
        Json(ProbeResponse {
            status: "ready".to_string(),
        }),
    )
}
