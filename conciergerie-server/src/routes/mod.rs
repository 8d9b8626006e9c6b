//! API route modules and shared response types.

pub mod houses;
pub mod orders;
pub mod sync;
pub mod tasks;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use conciergerie_core::ConciergeError;

/// Standard API error body.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body returned by successful mutations.
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub fn success() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

/// Converts core errors to HTTP responses, mapping error kinds to status
/// codes so clients can tell a missing task from a storage failure.
pub struct ApiError(ConciergeError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            ConciergeError::MissingTenantHeader | ConciergeError::InvalidTenantId(_) => {
                StatusCode::BAD_REQUEST
            }
            ConciergeError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.0.to_string(),
        });
        (self.status(), body).into_response()
    }
}

impl From<ConciergeError> for ApiError {
    fn from(err: ConciergeError) -> Self {
        Self(err)
    }
}
