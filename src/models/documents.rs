// src/models/documents.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "document_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentKind {
    BookingConfirmation,
    Invoice,
    MonthlyReport,
}

// Trilha de auditoria: uma linha por PDF gerado
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDocument {
    pub id: Uuid,
    pub kind: DocumentKind,

    #[schema(example = "Confirmação de Reserva - A107")]
    pub title: String,

    // Id da reserva/fatura que originou o documento
    pub reference_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
}
