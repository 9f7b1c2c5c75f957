use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

/// Moves a pending booking toward usability: an admin approves it and/or
/// confirms the rider's KYC submission. A booking becomes active only when
/// both flags are set in the same decision; anything less keeps it pending.
pub struct ApprovalService {
    booking_repo: Arc<dyn BookingRepository>,
}

impl ApprovalService {
    pub fn new(booking_repo: Arc<dyn BookingRepository>) -> Self {
        Self { booking_repo }
    }

    /// The caller asserts KYC validity; nothing is recomputed here. A
    /// rejection leaves the booking pending, indistinguishable from one
    /// never reviewed.
    pub async fn decide(
        &self,
        booking_id: i64,
        approve: bool,
        verify_kyc: bool,
    ) -> Result<Booking, AppError> {
        let booking = self
            .booking_repo
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {booking_id} not found")))?;

        let target = if approve && verify_kyc {
            BookingStatus::Active
        } else {
            BookingStatus::Pending
        };

        if !booking.status.can_transition(target) {
            return Err(AppError::invalid_transition(booking.status.as_str(), target.as_str()));
        }

        let updated = self
            .booking_repo
            .set_review(booking_id, approve, verify_kyc, target)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {booking_id} not found")))?;

        info!(
            booking_id,
            approved = approve,
            kyc_verified = verify_kyc,
            status = updated.status.as_str(),
            "Booking review recorded"
        );

        Ok(updated)
    }
}
