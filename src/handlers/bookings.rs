// src/handlers/bookings.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::bookings::{Booking, BookingDetail, BookingStatus, Guest, RecordSource},
    services::booking_service::BookingRequest,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingPayload {
    // Rótulo do quarto como o usuário digita ("a107" serve)
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "A107")]
    pub room_number: String,

    #[schema(value_type = String, format = Date, example = "2024-06-01")]
    pub check_in: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-06-03")]
    pub check_out: NaiveDate,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Maria da Silva")]
    pub guest_name: String,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "11 99999-0000")]
    pub guest_phone: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReschedulePayload {
    #[schema(value_type = String, format = Date, example = "2024-06-02")]
    pub check_in: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2024-06-05")]
    pub check_out: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionBookingPayload {
    pub status: BookingStatus,
}

// POST /api/bookings
#[utoipa::path(
    post,
    path = "/api/bookings",
    tag = "Bookings",
    request_body = CreateBookingPayload,
    responses(
        (status = 201, description = "Reserva criada", body = Booking),
        (status = 404, description = "Quarto não encontrado"),
        (status = 409, description = "Quarto indisponível no período")
    )
)]
pub async fn create_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let booking = app_state
        .booking_service
        .create_booking(
            &app_state.db_pool,
            BookingRequest {
                room_label: payload.room_number,
                check_in: payload.check_in,
                check_out: payload.check_out,
                guest_name: payload.guest_name,
                guest_phone: payload.guest_phone,
            },
            RecordSource::Manual,
        )
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(booking)))
}

// GET /api/bookings
#[utoipa::path(
    get,
    path = "/api/bookings",
    tag = "Bookings",
    responses(
        (status = 200, description = "Reservas com hóspede e quarto resolvidos", body = Vec<BookingDetail>)
    )
)]
pub async fn list_bookings(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let bookings = app_state
        .booking_repo
        .list_detailed()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(bookings)))
}

// PATCH /api/bookings/{id}/dates
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/dates",
    tag = "Bookings",
    request_body = ReschedulePayload,
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Reserva reagendada, total recalculado", body = Booking),
        (status = 409, description = "Quarto indisponível nas novas datas")
    )
)]
pub async fn reschedule_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReschedulePayload>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .reschedule_booking(&app_state.db_pool, id, payload.check_in, payload.check_out)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// PATCH /api/bookings/{id}/status
#[utoipa::path(
    patch,
    path = "/api/bookings/{id}/status",
    tag = "Bookings",
    request_body = TransitionBookingPayload,
    params(("id" = Uuid, Path, description = "ID da reserva")),
    responses(
        (status = 200, description = "Status atualizado (com efeito no quarto)", body = Booking)
    )
)]
pub async fn transition_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<TransitionBookingPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let booking = app_state
        .booking_service
        .transition_booking(&app_state.db_pool, id, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(booking)))
}

// DELETE /api/bookings/{id}
pub async fn delete_booking(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .booking_repo
        .delete_booking(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  HÓSPEDES
// =============================================================================

// GET /api/guests
#[utoipa::path(
    get,
    path = "/api/guests",
    tag = "Guests",
    responses(
        (status = 200, description = "Lista de hóspedes", body = Vec<Guest>)
    )
)]
pub async fn list_guests(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let guests = app_state
        .booking_repo
        .list_guests()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guests)))
}

// GET /api/guests/{id}
pub async fn get_guest(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let guest = app_state
        .booking_repo
        .find_guest(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(guest)))
}
