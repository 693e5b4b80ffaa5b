// src/models/bookings.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booking_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

// Quem originou o registro: formulário manual ou tool call do assistente.
// Compartilhado com as tarefas (mesmo tipo no banco).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "record_source", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordSource {
    Manual,
    Ai,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,

    #[schema(example = "Maria da Silva")]
    pub full_name: String,

    #[schema(example = "+55 11 99999-0000")]
    pub phone: String,

    // Ids das reservas do hóspede, em ordem de criação
    pub history: Vec<Uuid>,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub guest_id: Uuid,
    pub room_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub check_in: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2024-06-03")]
    pub check_out: NaiveDate,

    pub status: BookingStatus,

    #[schema(example = "1000.00")]
    pub total_price: Decimal,

    pub source: RecordSource,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Reserva com os rótulos já resolvidos (JOIN com guests e rooms),
// para a listagem não obrigar o frontend a cruzar ids.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub booking: Booking,

    pub guest_name: String,
    pub guest_phone: String,
    pub room_number: String,
}
