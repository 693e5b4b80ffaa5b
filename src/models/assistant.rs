// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

// Payloads da conversa com o assistente. Os structs do protocolo do
// provedor de IA ficam no assistant_service; aqui é só a nossa API.

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    // "user" ou "model"
    #[schema(example = "user")]
    pub role: String,
    pub text: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Reserve o quarto A107 de 2024-06-01 a 2024-06-03 para Maria, telefone 11 99999-0000")]
    pub message: String,

    pub history: Option<Vec<ChatTurn>>,
}

// O que o tool call executou (quando o modelo pediu um)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    #[schema(example = "addBooking")]
    pub name: String,
    pub result: Value,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub reply: String,
    pub tool_outcome: Option<ToolOutcome>,
}
