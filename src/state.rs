use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{BookingRepository, CouponRepository, UserRepository, VehicleRepository};
use crate::domain::services::approval::ApprovalService;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub vehicle_repo: Arc<dyn VehicleRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub coupon_repo: Arc<dyn CouponRepository>,
    pub approval_service: Arc<ApprovalService>,
}
