// src/handlers/hr.rs

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
    models::hr::{Attendance, Employee, EmployeeStatus, PayrollSummary},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeePayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ana Souza")]
    pub full_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Recepcionista")]
    pub role_title: String,

    #[schema(example = "2500.00")]
    pub base_salary: Decimal,

    #[schema(value_type = String, format = Date, example = "2023-03-15")]
    pub hired_at: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeePayload {
    pub role_title: Option<String>,
    pub base_salary: Option<Decimal>,
    pub status: Option<EmployeeStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordAttendancePayload {
    pub employee_id: Uuid,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub work_date: NaiveDate,

    pub present: bool,
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct PayrollQuery {
    // Qualquer dia do mês desejado
    pub month: NaiveDate,
}

// POST /api/hr/employees
#[utoipa::path(
    post,
    path = "/api/hr/employees",
    tag = "HR",
    request_body = CreateEmployeePayload,
    responses(
        (status = 201, description = "Funcionário criado", body = Employee)
    )
)]
pub async fn create_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let employee = app_state
        .hr_repo
        .create_employee(
            &payload.full_name,
            &payload.role_title,
            payload.base_salary,
            payload.hired_at,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(employee)))
}

// GET /api/hr/employees
#[utoipa::path(
    get,
    path = "/api/hr/employees",
    tag = "HR",
    responses(
        (status = 200, description = "Lista de funcionários", body = Vec<Employee>)
    )
)]
pub async fn list_employees(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let employees = app_state
        .hr_repo
        .list_employees()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employees)))
}

// PATCH /api/hr/employees/{id}
pub async fn update_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEmployeePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let employee = app_state
        .hr_repo
        .update_employee(
            id,
            payload.role_title.as_deref(),
            payload.base_salary,
            payload.status,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(employee)))
}

// DELETE /api/hr/employees/{id}
pub async fn delete_employee(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .hr_repo
        .delete_employee(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// POST /api/hr/attendance
#[utoipa::path(
    post,
    path = "/api/hr/attendance",
    tag = "HR",
    request_body = RecordAttendancePayload,
    responses(
        (status = 200, description = "Marcação registrada (remarcar sobrescreve)", body = Attendance)
    )
)]
pub async fn record_attendance(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<RecordAttendancePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let attendance = app_state
        .hr_repo
        .record_attendance(
            payload.employee_id,
            payload.work_date,
            payload.present,
            payload.note.as_deref(),
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(attendance)))
}

// GET /api/hr/payroll?month=2024-06-01
#[utoipa::path(
    get,
    path = "/api/hr/payroll",
    tag = "HR",
    params(PayrollQuery),
    responses(
        (status = 200, description = "Folha do mês (salário proporcional ao ponto)", body = PayrollSummary)
    )
)]
pub async fn monthly_payroll(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<PayrollQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = app_state
        .payroll_service
        .monthly_summary(query.month)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(summary)))
}
