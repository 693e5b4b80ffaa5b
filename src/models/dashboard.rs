// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub occupied_rooms: i64,
    pub available_rooms: i64,
    pub arrivals_today: i64,
    pub departures_today: i64,
    pub revenue_month: Decimal,
    pub pending_invoices: i64,
    pub open_tasks: i64,
}

// Uma entrada por dia com receita de reservas fechadas
#[derive(Debug, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RevenueChartEntry {
    pub date: Option<String>,
    pub total: Option<Decimal>,
}
