use super::{ErrorCode, ErrorResponse};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Fallback for unmatched routes.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(ErrorCode::NotFound.default_message()));
    (StatusCode::NOT_FOUND, body).into_response()
}

/// Fallback for a known path hit with an unsupported method.
pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::MethodNotAllowed.default_message(),
    ));
    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
