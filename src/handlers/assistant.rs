// src/handlers/assistant.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::assistant::{ChatReply, ChatRequest},
};

// POST /api/assistant/chat
#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = "Assistant",
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Resposta do assistente (com tool call executada, se houver)", body = ChatReply),
        (status = 502, description = "Falha no provedor de IA")
    )
)]
pub async fn chat(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let reply = app_state
        .assistant_service
        .chat(&app_state.db_pool, payload)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(reply)))
}
