use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateBookingRequest;
use crate::api::dtos::responses::ApiResponse;
use crate::api::extractors::{client_addr::ClientAddr, json_body::JsonBody};
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    ClientAddr(source_address): ClientAddr,
    JsonBody(payload): JsonBody<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let params = payload.into_params(source_address)?;
    info!("create_booking: {} for {}..{}", params.email, params.dates.from_date, params.dates.to_date);

    let created = state.booking_service.submit(params).await?;

    let body = ApiResponse::ok(created)
        .with_message("Booking request submitted successfully! We'll contact you soon.");
    Ok((StatusCode::CREATED, Json(body)))
}

pub async fn get_blocked_dates(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let ranges = state.booking_service.blocked_ranges().await?;
    Ok(Json(ApiResponse::ok(ranges)))
}
