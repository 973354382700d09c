// Dream chat endpoint
//
// Validation happens entirely here; the interpreter is only invoked
// once the question has passed every rule. Provider failures are
// passed through as the classified error message, unaltered.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use dreambook_lib::models::chat::preview;
use dreambook_lib::models::{validate_question, ChatAnswer, ChatRequest, ErrorBody};

use crate::AppState;

/// POST /api/dream-chat
pub async fn dream_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatAnswer>, (StatusCode, Json<ErrorBody>)> {
    let question = validate_question(&request).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorBody {
                error: e.to_string(),
            }),
        )
    })?;

    let caller = request.user_id.as_deref().unwrap_or("anonymous");
    log::info!(
        "[chat] received question from {}: \"{}\"",
        caller,
        preview(question, 50)
    );

    match state
        .interpreter
        .interpret(question, request.user_id.as_deref())
        .await
    {
        Ok(answer) => Ok(Json(ChatAnswer { answer })),
        Err(e) => {
            log::error!("[chat] interpretation failed: {}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            ))
        }
    }
}
