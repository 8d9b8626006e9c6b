//! Task ordering endpoints.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::Value;

use conciergerie_core::orders;

use crate::routes::{ApiError, SuccessResponse, success};
use crate::state::AppState;
use crate::tenant::Tenant;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ordre-taches", get(get_order))
        .route("/api/sauver-ordre-taches", post(save_order))
}

#[derive(Deserialize)]
struct OrderQuery {
    date: Option<String>,
}

/// GET /api/ordre-taches?date=D - per-employee ordering for one day.
/// A missing date parameter resolves to the empty mapping.
async fn get_order(
    State(state): State<AppState>,
    Query(query): Query<OrderQuery>,
    tenant: Tenant,
) -> Result<Json<BTreeMap<String, Value>>, ApiError> {
    let Some(date) = query.date else {
        return Ok(Json(BTreeMap::new()));
    };
    let order = orders::get_order(&state.data_root, &state.locks, &tenant.id, &date).await?;
    Ok(Json(order))
}

#[derive(Deserialize)]
struct SaveOrderRequest {
    date: String,
    employe: String,
    ordre: Value,
}

/// POST /api/sauver-ordre-taches - upsert one employee's ordering for a day
async fn save_order(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(req): Json<SaveOrderRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    orders::save_order(
        &state.data_root,
        &state.locks,
        &tenant.id,
        &req.date,
        &req.employe,
        req.ordre,
    )
    .await?;
    Ok(success())
}
