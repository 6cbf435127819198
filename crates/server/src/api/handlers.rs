use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use showrunner_core::catalog::CatalogStatus;
use showrunner_core::{CommandError, CommandOutcome, SanitizedConfig};

use crate::metrics::encode_metrics;
use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

pub async fn get_config(State(state): State<Arc<AppState>>) -> Json<SanitizedConfig> {
    Json(state.sanitized_config())
}

#[derive(Deserialize)]
pub struct CommandRequest {
    pub command: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub async fn post_command(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CommandRequest>,
) -> Result<Json<CommandOutcome>, Response> {
    match state.orchestrator().handle_command(&request.command).await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e) => {
            // A translation failure is the command's fault, a dispatch
            // failure is the backend's.
            let status = match e {
                CommandError::Translate(_) => StatusCode::UNPROCESSABLE_ENTITY,
                CommandError::Dispatch(_) => StatusCode::BAD_GATEWAY,
            };
            Err((
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response())
        }
    }
}

pub async fn catalog_status(State(state): State<Arc<AppState>>) -> Json<Vec<CatalogStatus>> {
    Json(state.catalog_status())
}

pub async fn catalog_refresh(State(state): State<Arc<AppState>>) -> Json<Vec<CatalogStatus>> {
    Json(state.refresh_catalog().await)
}

pub async fn metrics() -> impl IntoResponse {
    (
        [("content-type", "text/plain; version=0.0.4")],
        encode_metrics(),
    )
}
