use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::models::booking::{KycPayload, PaymentPayload};
use crate::domain::ports::Page;
use crate::error::AppError;

/// Numeric fields arrive from the dashboards both as JSON numbers and as
/// numeric strings; either form must parse as an integer.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumField {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumField {
    pub fn as_i64(&self, field: &str) -> Result<i64, AppError> {
        match self {
            NumField::Int(n) => Ok(*n),
            NumField::Float(f) if f.fract() == 0.0 => Ok(*f as i64),
            NumField::Float(_) => Err(AppError::invalid_number(field)),
            NumField::Text(s) => s.trim().parse().map_err(|_| AppError::invalid_number(field)),
        }
    }
}

pub fn parse_numeric(field: &str, raw: &str) -> Result<i64, AppError> {
    raw.trim().parse().map_err(|_| AppError::invalid_number(field))
}

/// Text fields are trimmed; absent or blank counts as missing.
pub fn required_text(value: &Option<String>, field: &str) -> Result<String, AppError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(AppError::missing_field(field)),
    }
}

/// limit defaults to 10 and is clamped to 100; offset floors at 0.
pub fn resolve_page(limit: &Option<String>, offset: &Option<String>) -> Result<Page, AppError> {
    let limit = match limit {
        Some(raw) => parse_numeric("limit", raw)?,
        None => 10,
    };
    let offset = match offset {
        Some(raw) => parse_numeric("offset", raw)?,
        None => 0,
    };
    Ok(Page { limit: limit.clamp(1, 100), offset: offset.max(0) })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleQuery {
    pub id: Option<String>,
    pub vehicle_type: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub partner_id: Option<String>,
    pub search: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingQuery {
    pub status: Option<String>,
    pub user_id: Option<String>,
    pub vehicle_id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVehicleRequest {
    pub partner_id: Option<NumField>,
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub registration_number: Option<String>,
    pub year: Option<NumField>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub hourly_rate: Option<NumField>,
    pub daily_rate: Option<NumField>,
    pub monthly_rate: Option<NumField>,
    pub image: Option<String>,
    pub gps_enabled: Option<bool>,
    pub last_service_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVehicleRequest {
    pub partner_id: Option<NumField>,
    pub vehicle_type: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub registration_number: Option<String>,
    pub year: Option<NumField>,
    pub color: Option<String>,
    pub location: Option<String>,
    pub hourly_rate: Option<NumField>,
    pub daily_rate: Option<NumField>,
    pub monthly_rate: Option<NumField>,
    pub image: Option<String>,
    pub gps_enabled: Option<bool>,
    pub last_service_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub vehicle_id: Option<NumField>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_type: Option<String>,
    pub pickup_location: Option<String>,
    pub drop_location: Option<String>,
    pub kyc_payload: Option<KycPayload>,
    pub payment_payload: Option<PaymentPayload>,
}

/// Older dashboards also send a `status` member; it is derived server-side
/// and therefore ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecideBookingRequest {
    pub admin_approved: bool,
    #[serde(default)]
    pub kyc_verified: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCouponRequest {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<String>,
    pub discount_value: Option<NumField>,
    pub min_booking_amount: Option<NumField>,
    pub max_discount: Option<NumField>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    pub usage_limit: Option<NumField>,
}
