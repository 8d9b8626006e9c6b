//! Task endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use conciergerie_core::tasks;

use crate::routes::{ApiError, SuccessResponse, success};
use crate::state::AppState;
use crate::tenant::Tenant;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/taches", get(list_tasks).post(add_task))
        .route("/api/assigner-employe", post(assign_employee))
        .route("/api/assigner-couleur", post(set_status))
        .route("/api/planning/{date}", get(planning))
}

/// GET /api/taches - all tasks for the client
async fn list_tasks(
    State(state): State<AppState>,
    tenant: Tenant,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tasks = tasks::list_tasks(&state.data_root, &state.locks, &tenant.id).await?;
    Ok(Json(tasks))
}

/// POST /api/taches - append a task payload verbatim
async fn add_task(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(task): Json<Value>,
) -> Result<(StatusCode, Json<SuccessResponse>), ApiError> {
    tasks::add_task(&state.data_root, &state.locks, &tenant.id, task).await?;
    Ok((StatusCode::CREATED, success()))
}

#[derive(Deserialize)]
struct AssignRequest {
    id: String,
    employe: String,
}

/// POST /api/assigner-employe - assign an employee to a task
async fn assign_employee(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(req): Json<AssignRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    tasks::assign_employee(&state.data_root, &state.locks, &tenant.id, &req.id, &req.employe)
        .await?;
    Ok(success())
}

#[derive(Deserialize)]
struct StatusRequest {
    id: String,
    etat: Value,
}

/// POST /api/assigner-couleur - set a task's completion state
async fn set_status(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(req): Json<StatusRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    tasks::set_status(&state.data_root, &state.locks, &tenant.id, &req.id, req.etat).await?;
    Ok(success())
}

/// GET /api/planning/{date} - tasks whose date matches exactly
async fn planning(
    State(state): State<AppState>,
    Path(date): Path<String>,
    tenant: Tenant,
) -> Result<Json<Vec<Value>>, ApiError> {
    let tasks = tasks::tasks_for_date(&state.data_root, &state.locks, &tenant.id, &date).await?;
    Ok(Json(tasks))
}
