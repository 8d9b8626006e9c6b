//! House registry endpoints.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use conciergerie_core::houses::{self, House};

use crate::routes::{ApiError, SuccessResponse, success};
use crate::state::AppState;
use crate::tenant::Tenant;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/maisons", get(list_houses))
        .route("/api/supprimer-maison", post(delete_house))
}

/// GET /api/maisons - all registered houses
async fn list_houses(
    State(state): State<AppState>,
    tenant: Tenant,
) -> Result<Json<Vec<House>>, ApiError> {
    let houses = houses::list_houses(&state.data_root, &state.locks, &tenant.id).await?;
    Ok(Json(houses))
}

#[derive(Deserialize)]
struct DeleteHouseRequest {
    nom: String,
}

/// POST /api/supprimer-maison - remove every house with the given name
async fn delete_house(
    State(state): State<AppState>,
    tenant: Tenant,
    Json(req): Json<DeleteHouseRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    houses::delete_house(&state.data_root, &state.locks, &tenant.id, &req.nom).await?;
    Ok(success())
}
