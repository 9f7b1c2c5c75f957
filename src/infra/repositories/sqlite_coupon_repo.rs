use crate::domain::{
    models::coupon::{Coupon, NewCoupon},
    ports::{CouponRepository, Page},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

pub struct SqliteCouponRepo {
    pool: SqlitePool,
}

impl SqliteCouponRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CouponRepository for SqliteCouponRepo {
    async fn create(&self, coupon: &NewCoupon) -> Result<Coupon, AppError> {
        sqlx::query_as::<_, Coupon>(
            "INSERT INTO coupons (code, description, discount_type, discount_value, min_booking_amount,
                                  max_discount, valid_from, valid_until, usage_limit, used_count, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 'active', ?)
             RETURNING *",
        )
        .bind(&coupon.code)
        .bind(&coupon.description)
        .bind(coupon.discount_type)
        .bind(coupon.discount_value)
        .bind(coupon.min_booking_amount)
        .bind(coupon.max_discount)
        .bind(coupon.valid_from)
        .bind(coupon.valid_until)
        .bind(coupon.usage_limit)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Coupon>, AppError> {
        sqlx::query_as::<_, Coupon>("SELECT * FROM coupons WHERE code = ?")
            .bind(code)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, page: Page) -> Result<Vec<Coupon>, AppError> {
        sqlx::query_as::<_, Coupon>(
            "SELECT * FROM coupons ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)
    }
}
