// src/models/hr.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "employee_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Uuid,

    #[schema(example = "Ana Souza")]
    pub full_name: String,

    #[schema(example = "Recepcionista")]
    pub role_title: String,

    #[schema(example = "2500.00")]
    pub base_salary: Decimal,

    pub status: EmployeeStatus,

    #[schema(value_type = String, format = Date, example = "2023-03-15")]
    pub hired_at: NaiveDate,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: Uuid,
    pub employee_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub work_date: NaiveDate,

    pub present: bool,
    pub note: Option<String>,
}

// Linha de folha calculada em memória (não é tabela)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollEntry {
    pub employee_id: Uuid,
    pub full_name: String,
    pub base_salary: Decimal,
    pub days_present: i64,
    pub days_absent: i64,
    // Salário proporcional aos dias de ponto registrados no mês
    pub net_pay: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PayrollSummary {
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub reference_month: NaiveDate,
    pub entries: Vec<PayrollEntry>,
    pub total_net: Decimal,
}
