// HTTP route handlers

pub mod chat;
pub mod health;

use axum::http::StatusCode;
use axum::response::Json;

use dreambook_lib::models::ErrorBody;

/// JSON 404 fallback
pub async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not Found".to_string(),
        }),
    )
}
