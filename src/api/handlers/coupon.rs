use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{required_text, resolve_page, CreateCouponRequest, PageQuery};
use crate::api::extractors::auth::{AdminUser, AuthUser};
use crate::domain::models::coupon::{self, DiscountType, NewCoupon};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_coupons(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<PageQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = resolve_page(&query.limit, &query.offset)?;
    let coupons = state.coupon_repo.list(page).await?;
    Ok(Json(coupons))
}

pub async fn create_coupon(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Json(payload): Json<CreateCouponRequest>,
) -> Result<impl IntoResponse, AppError> {
    let discount_raw = required_text(&payload.discount_type, "discountType")?;
    let discount_type = DiscountType::parse(&discount_raw)
        .ok_or_else(|| AppError::validation(format!("Unknown discount type: {discount_raw}")))?;

    let discount_value = payload
        .discount_value
        .as_ref()
        .ok_or_else(|| AppError::missing_field("discountValue"))?
        .as_i64("discountValue")?;
    if discount_value <= 0 {
        return Err(AppError::validation("discountValue must be positive"));
    }
    if discount_type == DiscountType::Percentage && discount_value > 100 {
        return Err(AppError::validation("Percentage discount cannot exceed 100"));
    }

    let valid_from = payload
        .valid_from
        .ok_or_else(|| AppError::missing_field("validFrom"))?;
    let valid_until = payload
        .valid_until
        .ok_or_else(|| AppError::missing_field("validUntil"))?;
    if valid_from >= valid_until {
        return Err(AppError::validation("validFrom must precede validUntil"));
    }

    let min_booking_amount = match &payload.min_booking_amount {
        Some(raw) => Some(raw.as_i64("minBookingAmount")?),
        None => None,
    };
    let max_discount = match &payload.max_discount {
        Some(raw) => Some(raw.as_i64("maxDiscount")?),
        None => None,
    };
    let usage_limit = match &payload.usage_limit {
        Some(raw) => Some(raw.as_i64("usageLimit")?),
        None => None,
    };

    let code = match payload.code.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw.to_uppercase(),
        _ => coupon::generate_code(),
    };

    if state.coupon_repo.find_by_code(&code).await?.is_some() {
        return Err(AppError::duplicate_coupon_code(&code));
    }

    let new_coupon = NewCoupon {
        code,
        description: payload.description.clone(),
        discount_type,
        discount_value,
        min_booking_amount,
        max_discount,
        valid_from,
        valid_until,
        usage_limit,
    };

    let created = state.coupon_repo.create(&new_coupon).await?;
    info!("Coupon {} created ({})", created.id, created.code);

    Ok((StatusCode::CREATED, Json(created)))
}
