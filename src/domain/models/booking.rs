use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(BookingStatus::Pending),
            "active" => Some(BookingStatus::Active),
            "completed" => Some(BookingStatus::Completed),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Active => "active",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Permitted status moves. completed and cancelled are terminal;
    /// active can fall back to pending when a review is revoked.
    pub fn can_transition(self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        if self == next {
            return true;
        }
        matches!(
            (self, next),
            (Pending, Active)
                | (Pending, Cancelled)
                | (Active, Pending)
                | (Active, Completed)
                | (Active, Cancelled)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum DurationType {
    Hourly,
    Daily,
    Monthly,
}

impl DurationType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "hourly" => Some(DurationType::Hourly),
            "daily" => Some(DurationType::Daily),
            "monthly" => Some(DurationType::Monthly),
            _ => None,
        }
    }

    fn unit_seconds(&self) -> i64 {
        match self {
            DurationType::Hourly => 3_600,
            DurationType::Daily => 86_400,
            // billing month is a flat 30 days
            DurationType::Monthly => 30 * 86_400,
        }
    }

    /// Billable units between start and end, partial units rounded up.
    /// An open-ended booking is charged one unit.
    pub fn billable_units(&self, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> i64 {
        let Some(end) = end else { return 1 };
        let secs = (end - start).num_seconds().max(0);
        let unit = self.unit_seconds();
        ((secs + unit - 1) / unit).max(1)
    }
}

/// Identity documents submitted by the rider at booking time. Verified
/// manually by an admin; the service never re-validates the contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycPayload {
    pub phone: String,
    pub id_number: String,
    #[serde(default)]
    pub license_number: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
}

/// How the rider intends to pay. Capture itself happens at the external
/// gateway; only the method and its reference are recorded here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "lowercase")]
pub enum PaymentPayload {
    Upi { reference: String },
    Card { reference: String },
    Netbanking { reference: String },
    Cash {},
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_type: DurationType,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub pickup_location: String,
    pub drop_location: Option<String>,
    pub kyc_payload: Option<Json<KycPayload>>,
    pub payment_payload: Option<Json<PaymentPayload>>,
    pub admin_approved: bool,
    pub kyc_verified: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewBooking {
    pub user_id: i64,
    pub vehicle_id: i64,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub duration_type: DurationType,
    pub total_amount: i64,
    pub pickup_location: String,
    pub drop_location: Option<String>,
    pub kyc_payload: Option<KycPayload>,
    pub payment_payload: Option<PaymentPayload>,
}
