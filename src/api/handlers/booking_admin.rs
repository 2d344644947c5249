use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{ListBookingsQuery, RejectBookingRequest};
use crate::api::dtos::responses::ApiResponse;
use crate::api::extractors::{admin::AdminUser, json_body::{OptionalJsonBody, QueryParams}};
use crate::domain::models::booking::BookingStatus;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    // Unknown filter values fall back to the unfiltered list.
    let status = query.status.as_deref().and_then(|s| s.parse::<BookingStatus>().ok());
    let bookings = state.booking_service.list(status).await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn list_pending_bookings(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_service.list_pending().await?;
    Ok(Json(ApiResponse::list(bookings)))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let confirmed = state.booking_service.confirm(&booking_id).await?;
    Ok(Json(ApiResponse::ok(confirmed).with_message("Booking confirmed successfully")))
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(booking_id): Path<String>,
    OptionalJsonBody(payload): OptionalJsonBody<RejectBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let reason = payload.and_then(|p| p.reason);
    let rejection = state.booking_service.reject(&booking_id, reason).await?;
    let warning = rejection.notification.warning();

    let message = if warning.is_none() {
        "Booking rejected and user notified via email"
    } else {
        info!("Booking {} rejected without notification", booking_id);
        "Booking rejected"
    };

    Ok(Json(ApiResponse::ok(rejection.booking).with_message(message).with_warning(warning)))
}
