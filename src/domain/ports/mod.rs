use crate::domain::models::{
    booking::{Booking, BookingStatus, NewBooking},
    coupon::{Coupon, NewCoupon},
    user::{NewUser, User},
    vehicle::{NewVehicle, Vehicle, VehicleStatus, VehicleType},
};
use crate::error::AppError;
use async_trait::async_trait;

/// Paging window resolved at the API boundary: limit defaults to 10 and is
/// clamped to 100 before it reaches a repository.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

#[derive(Debug, Default, Clone)]
pub struct VehicleFilter {
    pub vehicle_type: Option<VehicleType>,
    pub status: Option<VehicleStatus>,
    pub location: Option<String>,
    pub partner_id: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub user_id: Option<i64>,
    pub vehicle_id: Option<i64>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, page: Page) -> Result<Vec<User>, AppError>;
    async fn delete(&self, id: i64) -> Result<Option<User>, AppError>;
}

#[async_trait]
pub trait VehicleRepository: Send + Sync {
    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError>;
    async fn find_by_registration(&self, registration: &str) -> Result<Option<Vehicle>, AppError>;
    async fn list(&self, filter: &VehicleFilter, page: Page) -> Result<Vec<Vehicle>, AppError>;
    async fn update(&self, vehicle: &Vehicle) -> Result<Vehicle, AppError>;
    async fn delete(&self, id: i64) -> Result<Option<Vehicle>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError>;
    async fn list(&self, filter: BookingFilter, page: Page) -> Result<Vec<Booking>, AppError>;
    /// Writes both review flags and the resulting status in one statement.
    /// Returns None when the booking vanished between lookup and update.
    async fn set_review(
        &self,
        id: i64,
        admin_approved: bool,
        kyc_verified: bool,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError>;
}

#[async_trait]
pub trait CouponRepository: Send + Sync {
    async fn create(&self, coupon: &NewCoupon) -> Result<Coupon, AppError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError>;
    async fn list(&self, page: Page) -> Result<Vec<Coupon>, AppError>;
}
