use super::booking::DurationType;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum VehicleType {
    Bike,
    Scooter,
    Electric,
}

impl VehicleType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "bike" => Some(VehicleType::Bike),
            "scooter" => Some(VehicleType::Scooter),
            "electric" => Some(VehicleType::Electric),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Booked,
    Maintenance,
    Inactive,
}

impl VehicleStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "available" => Some(VehicleStatus::Available),
            "booked" => Some(VehicleStatus::Booked),
            "maintenance" => Some(VehicleStatus::Maintenance),
            "inactive" => Some(VehicleStatus::Inactive),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub partner_id: i64,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    pub year: i32,
    pub color: String,
    pub image: Option<String>,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
    pub status: VehicleStatus,
    pub location: String,
    pub gps_enabled: bool,
    pub last_service_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Vehicle {
    /// Rate in integer currency units for one billing unit of the given granularity.
    pub fn rate_for(&self, duration_type: DurationType) -> i64 {
        match duration_type {
            DurationType::Hourly => self.hourly_rate,
            DurationType::Daily => self.daily_rate,
            DurationType::Monthly => self.monthly_rate,
        }
    }
}

pub struct NewVehicle {
    pub partner_id: i64,
    pub vehicle_type: VehicleType,
    pub brand: String,
    pub model: String,
    pub registration_number: String,
    pub year: i32,
    pub color: String,
    pub image: Option<String>,
    pub hourly_rate: i64,
    pub daily_rate: i64,
    pub monthly_rate: i64,
    pub status: VehicleStatus,
    pub location: String,
    pub gps_enabled: bool,
    pub last_service_date: Option<NaiveDate>,
}
