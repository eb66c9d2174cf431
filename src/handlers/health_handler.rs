use crate::utils::handler::HandlerResult;
use crate::utils::response::ErrorResponse;
use axum::{Extension, Json, http::StatusCode};
use serde_json::json;
use sqlx::MySqlPool;

pub async fn health(Extension(db): Extension<MySqlPool>) -> HandlerResult {
    // Try a simple DB ping/query
    let res: Result<i64, sqlx::Error> = sqlx::query_scalar("SELECT 1").fetch_one(&db).await;

    match res {
        Ok(_) => Ok((StatusCode::OK, Json(json!({ "status": "ok", "db": "ok" })))),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            let response = ErrorResponse::new("Database unavailable");
            Err((StatusCode::INTERNAL_SERVER_ERROR, Json(response)))
        }
    }
}
