//! Tenant extraction from the `x-client-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use conciergerie_core::{ConciergeError, TenantId};

use crate::routes::ApiError;
use crate::state::AppState;

pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// A resolved tenant. Extraction validates the id and creates the client's
/// storage directory, so every handler downstream can assume both.
pub struct Tenant {
    pub id: TenantId,
}

impl FromRequestParts<AppState> for Tenant {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(ConciergeError::MissingTenantHeader)?;

        let id = TenantId::parse(raw)?;
        state.data_root.tenant_dir(&id)?;
        Ok(Tenant { id })
    }
}
