// src/handlers/rooms.rs

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
    models::rooms::{Room, RoomStatus, RoomType},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomPayload {
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "A107")]
    pub number: String,

    pub room_type: RoomType,

    #[schema(example = "500.00")]
    pub price: Decimal,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomPayload {
    pub room_type: Option<RoomType>,
    pub price: Option<Decimal>,
    pub status: Option<RoomStatus>,
}

// Intervalo [checkIn, checkOut) da consulta de disponibilidade
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

// POST /api/rooms
#[utoipa::path(
    post,
    path = "/api/rooms",
    tag = "Rooms",
    request_body = CreateRoomPayload,
    responses(
        (status = 201, description = "Quarto criado", body = Room),
        (status = 409, description = "Número de quarto já existe")
    )
)]
pub async fn create_room(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<CreateRoomPayload>,
) -> Result<impl IntoResponse, ApiError> {
    payload
        .validate()
        .map_err(|e| AppError::ValidationError(e).to_api_error(&locale, &app_state.i18n_store))?;

    let room = app_state
        .room_repo
        .create_room(&payload.number, payload.room_type, payload.price)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(room)))
}

// GET /api/rooms
#[utoipa::path(
    get,
    path = "/api/rooms",
    tag = "Rooms",
    responses(
        (status = 200, description = "Lista de quartos", body = Vec<Room>)
    )
)]
pub async fn list_rooms(
    State(app_state): State<AppState>,
    locale: Locale,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = app_state
        .room_repo
        .list_rooms()
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rooms)))
}

// GET /api/rooms/available?checkIn=...&checkOut=...
#[utoipa::path(
    get,
    path = "/api/rooms/available",
    tag = "Rooms",
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Quartos livres no período", body = Vec<Room>)
    )
)]
pub async fn list_available_rooms(
    State(app_state): State<AppState>,
    locale: Locale,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rooms = app_state
        .room_repo
        .list_available(query.check_in, query.check_out)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(rooms)))
}

// PATCH /api/rooms/{id}
pub async fn update_room(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRoomPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let room = app_state
        .room_repo
        .update_room(id, payload.room_type, payload.price, payload.status)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(room)))
}

// DELETE /api/rooms/{id}
pub async fn delete_room(
    State(app_state): State<AppState>,
    locale: Locale,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .room_repo
        .delete_room(id)
        .await
        .map_err(|app_err| app_err.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(StatusCode::NO_CONTENT)
}
