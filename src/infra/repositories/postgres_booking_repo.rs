use crate::domain::{
    models::booking::{Booking, BookingStatus, NewBooking},
    ports::{BookingFilter, BookingRepository, Page},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn create(&self, booking: &NewBooking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (user_id, vehicle_id, start_date, end_date, duration_type, total_amount,
                                   status, payment_status, pickup_location, drop_location, kyc_payload, payment_payload,
                                   admin_approved, kyc_verified, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', 'pending', $7, $8, $9, $10, FALSE, FALSE, $11)
             RETURNING *",
        )
        .bind(booking.user_id)
        .bind(booking.vehicle_id)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.duration_type)
        .bind(booking.total_amount)
        .bind(&booking.pickup_location)
        .bind(&booking.drop_location)
        .bind(booking.kyc_payload.as_ref().map(Json))
        .bind(booking.payment_payload.as_ref().map(Json))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, filter: BookingFilter, page: Page) -> Result<Vec<Booking>, AppError> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM bookings WHERE 1=1");

        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status);
        }
        if let Some(user_id) = filter.user_id {
            qb.push(" AND user_id = ").push_bind(user_id);
        }
        if let Some(vehicle_id) = filter.vehicle_id {
            qb.push(" AND vehicle_id = ").push_bind(vehicle_id);
        }

        qb.push(" ORDER BY created_at DESC, id DESC LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        qb.build_query_as::<Booking>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn set_review(
        &self,
        id: i64,
        admin_approved: bool,
        kyc_verified: bool,
        status: BookingStatus,
    ) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "UPDATE bookings SET admin_approved = $1, kyc_verified = $2, status = $3
             WHERE id = $4
             RETURNING *",
        )
        .bind(admin_approved)
        .bind(kyc_verified)
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
