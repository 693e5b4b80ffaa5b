// src/handlers/documents.rs
//
// Os PDFs voltam no corpo da resposta, prontos para download; cada
// geração deixa a linha de auditoria em generated_documents.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::documents::GeneratedDocument,
};

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReportPayload {
    // Qualquer dia do mês desejado
    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub month: NaiveDate,
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> impl IntoResponse + use<> {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        bytes,
    )
}

// POST /api/documents/bookings/{id}
#[utoipa::path(
    post,
    path = "/api/documents/bookings/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "PDF de confirmação da reserva", content_type = "application/pdf"),
        (status = 404, description = "Reserva não encontrada")
    )
)]
pub async fn booking_confirmation_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = app_state
        .document_service
        .booking_confirmation(&app_state.db_pool, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(pdf_response(&format!("reserva-{}.pdf", id), bytes))
}

// POST /api/documents/invoices/{id}
#[utoipa::path(
    post,
    path = "/api/documents/invoices/{id}",
    tag = "Documents",
    params(("id" = Uuid, Path, description = "ID da fatura")),
    responses(
        (status = 200, description = "PDF da fatura de aluguel", content_type = "application/pdf"),
        (status = 404, description = "Fatura não encontrada")
    )
)]
pub async fn invoice_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = app_state
        .document_service
        .invoice_pdf(&app_state.db_pool, id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(pdf_response(&format!("fatura-{}.pdf", id), bytes))
}

// POST /api/documents/reports/monthly
#[utoipa::path(
    post,
    path = "/api/documents/reports/monthly",
    tag = "Documents",
    request_body = MonthlyReportPayload,
    responses(
        (status = 200, description = "PDF do relatório mensal", content_type = "application/pdf")
    )
)]
pub async fn monthly_report_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<MonthlyReportPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = app_state
        .document_service
        .monthly_report(&app_state.db_pool, payload.month)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    let filename = format!("relatorio-{}.pdf", payload.month.format("%Y-%m"));
    Ok(pdf_response(&filename, bytes))
}

// GET /api/documents
#[utoipa::path(
    get,
    path = "/api/documents",
    tag = "Documents",
    responses(
        (status = 200, description = "Histórico de documentos gerados", body = Vec<GeneratedDocument>)
    )
)]
pub async fn list_documents(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let documents = app_state
        .document_repo
        .list_documents()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(documents)))
}
