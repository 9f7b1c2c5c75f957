use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    parse_numeric, required_text, resolve_page, BookingQuery, CreateBookingRequest,
    DecideBookingRequest,
};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::booking::{BookingStatus, DurationType, NewBooking};
use crate::domain::ports::BookingFilter;
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<BookingQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        Some(raw) => Some(BookingStatus::parse(raw).ok_or_else(|| AppError::invalid_status(raw))?),
        None => None,
    };
    let user_id = match query.user_id.as_deref() {
        Some(raw) => Some(parse_numeric("userId", raw)?),
        None => None,
    };
    let vehicle_id = match query.vehicle_id.as_deref() {
        Some(raw) => Some(parse_numeric("vehicleId", raw)?),
        None => None,
    };

    let filter = BookingFilter { status, user_id, vehicle_id };
    let page = resolve_page(&query.limit, &query.offset)?;

    let bookings = state.booking_repo.list(filter, page).await?;
    Ok(Json(bookings))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.user_id()?;

    let vehicle_id = payload
        .vehicle_id
        .as_ref()
        .ok_or_else(|| AppError::missing_field("vehicleId"))?
        .as_i64("vehicleId")?;
    let start_date = payload
        .start_date
        .ok_or_else(|| AppError::missing_field("startDate"))?;
    let duration_raw = required_text(&payload.duration_type, "durationType")?;
    let duration_type = DurationType::parse(&duration_raw)
        .ok_or_else(|| AppError::validation(format!("Unknown duration type: {duration_raw}")))?;
    let pickup_location = required_text(&payload.pickup_location, "pickupLocation")?;

    if let Some(end_date) = payload.end_date {
        if end_date <= start_date {
            return Err(AppError::validation("endDate must be after startDate"));
        }
    }

    let vehicle = state
        .vehicle_repo
        .find_by_id(vehicle_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {vehicle_id} not found")))?;

    let units = duration_type.billable_units(start_date, payload.end_date);
    let total_amount = vehicle.rate_for(duration_type) * units;

    let booking = NewBooking {
        user_id,
        vehicle_id,
        start_date,
        end_date: payload.end_date,
        duration_type,
        total_amount,
        pickup_location,
        drop_location: payload.drop_location.clone(),
        kyc_payload: payload.kyc_payload.clone(),
        payment_payload: payload.payment_payload.clone(),
    };

    let created = state.booking_repo.create(&booking).await?;
    info!(
        "Booking {} created by user {} for vehicle {} ({} units, total {})",
        created.id, user_id, vehicle_id, units, total_amount
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Admin review of a pending booking. Approval and KYC verification are
/// independent flags; the booking only goes active when both are set.
pub async fn decide_booking(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Path(raw_id): Path<String>,
    Json(payload): Json<DecideBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    let booking_id = parse_numeric("id", &raw_id)?;

    let updated = state
        .approval_service
        .decide(booking_id, payload.admin_approved, payload.kyc_verified)
        .await?;

    Ok(Json(updated))
}
