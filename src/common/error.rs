// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erro de domínio, com `thiserror` para melhor ergonomia.
// Substitui a antiga convenção de string com prefixo "Error:": cada
// condição tem uma variante própria e o caller faz match, não sniffing.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Quarto '{0}' não encontrado")]
    RoomNotFound(String),

    #[error("Quarto indisponível no período solicitado")]
    RoomUnavailable,

    #[error("Registro não encontrado")]
    RecordNotFound,

    #[error("Violação de unicidade: {0}")]
    UniqueConstraintViolation(String),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Falha no serviço de IA: {0}")]
    AssistantUpstream(String),

    #[error("Erro de rede no assistente: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // Cada variante vira (status HTTP, código de mensagem no catálogo i18n)
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "validation_failed"),
            AppError::RoomNotFound(_) => (StatusCode::NOT_FOUND, "room_not_found"),
            AppError::RoomUnavailable => (StatusCode::CONFLICT, "room_unavailable"),
            AppError::RecordNotFound => (StatusCode::NOT_FOUND, "record_not_found"),
            AppError::UniqueConstraintViolation(_) => (StatusCode::CONFLICT, "unique_violation"),
            AppError::FontNotFound(_) => (StatusCode::INTERNAL_SERVER_ERROR, "font_not_found"),
            AppError::AssistantUpstream(_) | AppError::HttpClient(_) => {
                (StatusCode::BAD_GATEWAY, "assistant_upstream")
            }
            AppError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }

    /// Converte o erro de domínio na resposta HTTP, já com a mensagem
    /// traduzida para o idioma do request.
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let (status, code) = self.status_and_code();

        // Erros 5xx são logados com o detalhe completo; o cliente só vê
        // a mensagem genérica do catálogo.
        if status.is_server_error() {
            tracing::error!("Erro interno: {:?}", self);
        }

        let mut message = store.message(&locale.0, code);

        // Placeholders simples do catálogo ({label}, {detail})
        match self {
            AppError::RoomNotFound(label) => {
                message = message.replace("{label}", label);
            }
            AppError::UniqueConstraintViolation(detail) => {
                message = message.replace("{detail}", detail);
            }
            _ => {}
        }

        // Validação devolve também o mapa campo -> mensagens
        let details = if let AppError::ValidationError(errors) = self {
            let mut map = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                map.insert(field.to_string(), messages);
            }
            Some(json!(map))
        } else {
            None
        };

        ApiError {
            status,
            message,
            details,
        }
    }
}

// Erro já "pronto para HTTP": status + mensagem localizada.
// É o tipo de retorno dos handlers.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => Json(json!({ "error": self.message, "details": details })),
            None => Json(json!({ "error": self.message })),
        };

        (self.status, body).into_response()
    }
}
