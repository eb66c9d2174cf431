use crate::utils::response::ErrorResponse;
use axum::{Json, http::StatusCode};

/// Generic handler result type used across HTTP handlers to simplify signatures.
///
/// Success carries the endpoint's payload; failure is always the shared
/// `{"error": ...}` body.
pub type HandlerResult<T = serde_json::Value> =
    Result<(StatusCode, Json<T>), (StatusCode, Json<ErrorResponse>)>;
