use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{
    parse_numeric, required_text, resolve_page, CreateVehicleRequest, IdQuery,
    UpdateVehicleRequest, VehicleQuery,
};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::vehicle::{NewVehicle, VehicleStatus, VehicleType};
use crate::domain::ports::VehicleFilter;
use crate::error::AppError;
use crate::state::AppState;

/// `?id=` returns a single vehicle; any other combination of params is a
/// filtered list. The dashboards use one endpoint for both.
pub async fn list_or_get_vehicles(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VehicleQuery>,
) -> Result<Response, AppError> {
    if let Some(raw_id) = &query.id {
        let id = parse_numeric("id", raw_id)?;
        let vehicle = state
            .vehicle_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Vehicle {id} not found")))?;
        return Ok(Json(vehicle).into_response());
    }

    let vehicle_type = match query.vehicle_type.as_deref() {
        Some(raw) => Some(VehicleType::parse(raw).ok_or_else(|| AppError::invalid_vehicle_type(raw))?),
        None => None,
    };
    let status = match query.status.as_deref() {
        Some(raw) => Some(VehicleStatus::parse(raw).ok_or_else(|| AppError::invalid_status(raw))?),
        None => None,
    };
    let partner_id = match query.partner_id.as_deref() {
        Some(raw) => Some(parse_numeric("partnerId", raw)?),
        None => None,
    };

    let filter = VehicleFilter {
        vehicle_type,
        status,
        location: query.location.clone(),
        partner_id,
        search: query.search.clone(),
    };
    let page = resolve_page(&query.limit, &query.offset)?;

    let vehicles = state.vehicle_repo.list(&filter, page).await?;
    Ok(Json(vehicles).into_response())
}

pub async fn create_vehicle(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let partner_raw = payload
        .partner_id
        .as_ref()
        .ok_or_else(|| AppError::missing_field("partnerId"))?;
    let vehicle_type_raw = required_text(&payload.vehicle_type, "vehicleType")?;
    let brand = required_text(&payload.brand, "brand")?;
    let model = required_text(&payload.model, "model")?;
    let registration_number = required_text(&payload.registration_number, "registrationNumber")?;
    let year_raw = payload.year.as_ref().ok_or_else(|| AppError::missing_field("year"))?;
    let color = required_text(&payload.color, "color")?;
    let location = required_text(&payload.location, "location")?;
    let hourly_raw = payload
        .hourly_rate
        .as_ref()
        .ok_or_else(|| AppError::missing_field("hourlyRate"))?;
    let daily_raw = payload
        .daily_rate
        .as_ref()
        .ok_or_else(|| AppError::missing_field("dailyRate"))?;
    let monthly_raw = payload
        .monthly_rate
        .as_ref()
        .ok_or_else(|| AppError::missing_field("monthlyRate"))?;

    let partner_id = partner_raw.as_i64("partnerId")?;
    let year = year_raw.as_i64("year")? as i32;
    let hourly_rate = hourly_raw.as_i64("hourlyRate")?;
    let daily_rate = daily_raw.as_i64("dailyRate")?;
    let monthly_rate = monthly_raw.as_i64("monthlyRate")?;

    let vehicle_type = VehicleType::parse(&vehicle_type_raw)
        .ok_or_else(|| AppError::invalid_vehicle_type(&vehicle_type_raw))?;
    let status = match payload.status.as_deref() {
        Some(raw) => VehicleStatus::parse(raw).ok_or_else(|| AppError::invalid_status(raw))?,
        None => VehicleStatus::Available,
    };

    if state.user_repo.find_by_id(partner_id).await?.is_none() {
        return Err(AppError::partner_not_found(partner_id));
    }
    if state
        .vehicle_repo
        .find_by_registration(&registration_number)
        .await?
        .is_some()
    {
        return Err(AppError::duplicate_registration(&registration_number));
    }

    let vehicle = NewVehicle {
        partner_id,
        vehicle_type,
        brand,
        model,
        registration_number,
        year,
        color,
        image: payload.image.clone(),
        hourly_rate,
        daily_rate,
        monthly_rate,
        status,
        location,
        gps_enabled: payload.gps_enabled.unwrap_or(true),
        last_service_date: payload.last_service_date,
    };

    let created = state.vehicle_repo.create(&vehicle).await?;
    info!("Vehicle {} ({}) listed by partner {}", created.id, created.registration_number, created.partner_id);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_vehicle(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<IdQuery>,
    Json(payload): Json<UpdateVehicleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let raw_id = query.id.as_ref().ok_or_else(|| AppError::missing_field("id"))?;
    let id = parse_numeric("id", raw_id)?;

    let mut vehicle = state
        .vehicle_repo
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {id} not found")))?;

    if let Some(raw) = &payload.partner_id {
        let partner_id = raw.as_i64("partnerId")?;
        if state.user_repo.find_by_id(partner_id).await?.is_none() {
            return Err(AppError::partner_not_found(partner_id));
        }
        vehicle.partner_id = partner_id;
    }
    if payload.vehicle_type.is_some() {
        let raw = required_text(&payload.vehicle_type, "vehicleType")?;
        vehicle.vehicle_type =
            VehicleType::parse(&raw).ok_or_else(|| AppError::invalid_vehicle_type(&raw))?;
    }
    if payload.brand.is_some() {
        vehicle.brand = required_text(&payload.brand, "brand")?;
    }
    if payload.model.is_some() {
        vehicle.model = required_text(&payload.model, "model")?;
    }
    if payload.registration_number.is_some() {
        let registration = required_text(&payload.registration_number, "registrationNumber")?;
        // uniqueness re-checked only when the plate actually changes
        if registration != vehicle.registration_number {
            if state
                .vehicle_repo
                .find_by_registration(&registration)
                .await?
                .is_some()
            {
                return Err(AppError::duplicate_registration(&registration));
            }
            vehicle.registration_number = registration;
        }
    }
    if let Some(raw) = &payload.year {
        vehicle.year = raw.as_i64("year")? as i32;
    }
    if payload.color.is_some() {
        vehicle.color = required_text(&payload.color, "color")?;
    }
    if payload.location.is_some() {
        vehicle.location = required_text(&payload.location, "location")?;
    }
    if let Some(raw) = &payload.hourly_rate {
        vehicle.hourly_rate = raw.as_i64("hourlyRate")?;
    }
    if let Some(raw) = &payload.daily_rate {
        vehicle.daily_rate = raw.as_i64("dailyRate")?;
    }
    if let Some(raw) = &payload.monthly_rate {
        vehicle.monthly_rate = raw.as_i64("monthlyRate")?;
    }
    if let Some(raw) = payload.status.as_deref() {
        vehicle.status = VehicleStatus::parse(raw).ok_or_else(|| AppError::invalid_status(raw))?;
    }
    if let Some(image) = &payload.image {
        vehicle.image = Some(image.clone());
    }
    if let Some(gps_enabled) = payload.gps_enabled {
        vehicle.gps_enabled = gps_enabled;
    }
    if let Some(last_service_date) = payload.last_service_date {
        vehicle.last_service_date = Some(last_service_date);
    }

    let updated = state.vehicle_repo.update(&vehicle).await?;
    info!("Vehicle {} updated", updated.id);

    Ok(Json(updated))
}

pub async fn delete_vehicle(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<IdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw_id = query.id.as_ref().ok_or_else(|| AppError::missing_field("id"))?;
    let id = parse_numeric("id", raw_id)?;

    let deleted = state
        .vehicle_repo
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Vehicle {id} not found")))?;

    info!("Vehicle {} deleted", id);
    Ok(Json(deleted))
}
