// src/models/tenancy.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Inquilino de aluguel mensal (diferente do hóspede de diária)

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "tenant_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenantStatus {
    Active,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "invoice_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Overdue,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: Uuid,

    #[schema(example = "João Pereira")]
    pub full_name: String,
    pub phone: String,

    pub room_id: Uuid,

    #[schema(example = "1800.00")]
    pub monthly_rent: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,

    pub status: TenantStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub tenant_id: Uuid,

    // Sempre o dia 1 do mês de competência
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub reference_month: NaiveDate,

    #[schema(example = "1800.00")]
    pub amount: Decimal,

    pub status: InvoiceStatus,

    #[schema(value_type = String, format = Date, example = "2024-06-05")]
    pub due_date: NaiveDate,

    pub paid_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

// Fatura com o nome do inquilino resolvido para a listagem
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDetail {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub invoice: Invoice,

    pub tenant_name: String,
    pub room_number: String,
}
