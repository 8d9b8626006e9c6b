//! Calendar synchronization endpoint.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::Serialize;

use conciergerie_core::sync::{self, SyncOutcome};

use crate::state::AppState;
use crate::tenant::Tenant;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/sync", post(run_sync))
}

#[derive(Serialize)]
pub struct SyncResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
pub struct SyncErrorResponse {
    pub error: String,
    pub details: String,
}

/// POST /api/sync - regenerate the client's tasks from its calendars.
///
/// Success means "the pipeline completed": a client without houses or with
/// only failing feeds still gets a 200.
async fn run_sync(State(state): State<AppState>, tenant: Tenant) -> Response {
    match sync::sync_tenant(&state.data_root, &state.locks, &state.http, &tenant.id).await {
        Ok(outcome) => {
            let message = match outcome {
                SyncOutcome::SkippedNoHouses => {
                    format!("No houses configured for {}", tenant.id)
                }
                SyncOutcome::Completed { houses, tasks } => {
                    format!("Synchronized {tasks} tasks from {houses} houses for {}", tenant.id)
                }
            };
            Json(SyncResponse {
                success: true,
                message,
            })
            .into_response()
        }
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(SyncErrorResponse {
                error: "Synchronization failed".to_string(),
                details: e.to_string(),
            }),
        )
            .into_response(),
    }
}
