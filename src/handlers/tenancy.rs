// src/handlers/tenancy.rs
//
// Aluguel mensal: o inquilino ocupa um quarto por tempo indeterminado
// (status MONTHLY_RENTAL, fora do circuito de reservas) e gera uma
// fatura por mês de competência.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::{
        rooms::RoomStatus,
        tenancy::{Invoice, InvoiceDetail, InvoiceStatus, Tenant, TenantStatus},
    },
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "João Pereira")]
    pub full_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "11 98888-0000")]
    pub phone: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "B201")]
    pub room_number: String,

    #[schema(example = "1800.00")]
    pub monthly_rent: Decimal,

    #[schema(value_type = String, format = Date, example = "2024-01-01")]
    pub start_date: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateInvoicePayload {
    // Qualquer dia do mês serve; normalizamos para o dia 1
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub reference_month: NaiveDate,

    // Sem vencimento informado, vale o dia 5 do mês de competência
    #[schema(value_type = Option<String>, format = Date, example = "2024-06-05")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SetInvoiceStatusPayload {
    pub status: InvoiceStatus,
}

// POST /api/tenants
#[utoipa::path(
    post,
    path = "/api/tenants",
    tag = "Tenancy",
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Inquilino criado, quarto em locação mensal", body = Tenant),
        (status = 404, description = "Quarto não encontrado")
    )
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    // Inquilino + troca de status do quarto na mesma transação
    let tenant = async {
        let mut tx = app_state.db_pool.begin().await?;

        let room = app_state
            .room_repo
            .find_by_label(&mut *tx, &payload.room_number)
            .await?
            .ok_or_else(|| AppError::RoomNotFound(payload.room_number.clone()))?;

        let tenant = app_state
            .tenancy_repo
            .insert_tenant(
                &mut *tx,
                &payload.full_name,
                &payload.phone,
                room.id,
                payload.monthly_rent,
                payload.start_date,
            )
            .await?;

        app_state
            .room_repo
            .set_status(&mut *tx, room.id, RoomStatus::MonthlyRental)
            .await?;

        tx.commit().await?;
        Ok::<_, AppError>(tenant)
    }
    .await
    .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(tenant)))
}

// GET /api/tenants
#[utoipa::path(
    get,
    path = "/api/tenants",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Lista de inquilinos", body = Vec<Tenant>)
    )
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let tenants = app_state
        .tenancy_repo
        .list_tenants()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(tenants)))
}

// POST /api/tenants/{id}/end
#[utoipa::path(
    post,
    path = "/api/tenants/{id}/end",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID do inquilino")),
    responses(
        (status = 200, description = "Locação encerrada, quarto liberado", body = Tenant)
    )
)]
pub async fn end_tenancy(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let tenant = async {
        let mut tx = app_state.db_pool.begin().await?;

        let tenant = app_state
            .tenancy_repo
            .set_tenant_status(&mut *tx, id, TenantStatus::Ended)
            .await?;

        app_state
            .room_repo
            .set_status(&mut *tx, tenant.room_id, RoomStatus::Available)
            .await?;

        tx.commit().await?;
        Ok::<_, AppError>(tenant)
    }
    .await
    .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(tenant)))
}

// =============================================================================
//  FATURAS
// =============================================================================

// POST /api/tenants/{id}/invoices
#[utoipa::path(
    post,
    path = "/api/tenants/{id}/invoices",
    tag = "Tenancy",
    request_body = GenerateInvoicePayload,
    params(("id" = Uuid, Path, description = "ID do inquilino")),
    responses(
        (status = 201, description = "Fatura do mês gerada", body = Invoice),
        (status = 409, description = "Fatura do mês já existe")
    )
)]
pub async fn generate_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<GenerateInvoicePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = async {
        let reference = payload
            .reference_month
            .with_day(1)
            .ok_or_else(|| anyhow::anyhow!("mês de referência inválido"))?;

        let due_date = match payload.due_date {
            Some(d) => d,
            None => reference
                .with_day(5)
                .ok_or_else(|| anyhow::anyhow!("mês de referência inválido"))?,
        };

        let mut tx = app_state.db_pool.begin().await?;

        // O valor é sempre o aluguel vigente do inquilino
        let tenant = app_state.tenancy_repo.find_tenant(&mut *tx, id).await?;

        let invoice = app_state
            .tenancy_repo
            .insert_invoice(&mut *tx, tenant.id, reference, tenant.monthly_rent, due_date)
            .await?;

        tx.commit().await?;
        Ok::<_, AppError>(invoice)
    }
    .await
    .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(invoice)))
}

// GET /api/invoices
#[utoipa::path(
    get,
    path = "/api/invoices",
    tag = "Tenancy",
    responses(
        (status = 200, description = "Faturas com inquilino e quarto resolvidos", body = Vec<InvoiceDetail>)
    )
)]
pub async fn list_invoices(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let invoices = app_state
        .tenancy_repo
        .list_invoices_detailed()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoices)))
}

// POST /api/invoices/{id}/pay
#[utoipa::path(
    post,
    path = "/api/invoices/{id}/pay",
    tag = "Tenancy",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "Fatura quitada", body = Invoice)
    )
)]
pub async fn pay_invoice(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .tenancy_repo
        .mark_invoice_paid(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}

// PATCH /api/invoices/{id}/status
pub async fn set_invoice_status(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetInvoiceStatusPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let invoice = app_state
        .tenancy_repo
        .set_invoice_status(id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(invoice)))
}
