// src/handlers/finance.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::finance::{Expense, ExpenseCategory, ExpenseSummaryEntry},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Troca de chuveiro do quarto A203")]
    pub description: String,

    pub category: ExpenseCategory,

    #[schema(example = "120.00")]
    pub amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-06-10")]
    pub spent_at: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpensePayload {
    pub description: Option<String>,
    pub category: Option<ExpenseCategory>,
    pub amount: Option<Decimal>,
    pub spent_at: Option<NaiveDate>,
}

// Filtro [from, to) opcional na listagem
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSummaryQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

// POST /api/expenses
#[utoipa::path(
    post,
    path = "/api/expenses",
    tag = "Finance",
    request_body = CreateExpensePayload,
    responses(
        (status = 201, description = "Despesa lançada", body = Expense)
    )
)]
pub async fn create_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let expense = app_state
        .finance_repo
        .create_expense(
            &payload.description,
            payload.category,
            payload.amount,
            payload.spent_at,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(expense)))
}

// GET /api/expenses
#[utoipa::path(
    get,
    path = "/api/expenses",
    tag = "Finance",
    params(ExpenseListQuery),
    responses(
        (status = 200, description = "Despesas (opcionalmente filtradas por período)", body = Vec<Expense>)
    )
)]
pub async fn list_expenses(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ExpenseListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let expenses = app_state
        .finance_repo
        .list_expenses(query.from, query.to)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expenses)))
}

// GET /api/expenses/summary?from=...&to=...
#[utoipa::path(
    get,
    path = "/api/expenses/summary",
    tag = "Finance",
    params(ExpenseSummaryQuery),
    responses(
        (status = 200, description = "Total por categoria no período", body = Vec<ExpenseSummaryEntry>)
    )
)]
pub async fn expense_summary(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<ExpenseSummaryQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .finance_repo
        .summary_by_category(query.from, query.to)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}

// PATCH /api/expenses/{id}
pub async fn update_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateExpensePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let expense = app_state
        .finance_repo
        .update_expense(
            id,
            payload.description.as_deref(),
            payload.category,
            payload.amount,
            payload.spent_at,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(expense)))
}

// DELETE /api/expenses/{id}
pub async fn delete_expense(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .finance_repo
        .delete_expense(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
