use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    services::chatbot::generate_reply,
    state::SharedState,
};

pub async fn chat_handler(
    State(state): State<SharedState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, AppError> {
    let Json(payload) = payload.map_err(|rejection| AppError::RequestValidation(rejection.body_text()))?;

    let trimmed = payload.message.trim();

    if trimmed.is_empty() {
        return Err(AppError::RequestValidation("Message cannot be empty".to_string()));
    }

    let reply = generate_reply(&state, trimmed).await?;

    Ok(Json(ChatResponse { reply }))
}
