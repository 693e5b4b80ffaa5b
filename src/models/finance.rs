// src/models/finance.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_category", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseCategory {
    Maintenance,
    Supplies,
    Utilities,
    Salaries,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,

    #[schema(example = "Troca de chuveiro do quarto A203")]
    pub description: String,

    pub category: ExpenseCategory,

    #[schema(example = "120.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-10")]
    pub spent_at: NaiveDate,

    pub created_at: DateTime<Utc>,
}

// Resultado do GROUP BY por categoria
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryEntry {
    pub category: ExpenseCategory,
    pub total: Option<Decimal>,
}
