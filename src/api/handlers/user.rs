use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{parse_numeric, required_text, resolve_page, CreateUserRequest, UserQuery};
use crate::api::extractors::auth::AdminUser;
use crate::domain::models::user::{NewUser, UserRole};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_or_get_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<UserQuery>,
) -> Result<Response, AppError> {
    if let Some(raw_id) = &query.id {
        let id = parse_numeric("id", raw_id)?;
        let user = state
            .user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;
        return Ok(Json(user).into_response());
    }

    let page = resolve_page(&query.limit, &query.offset)?;
    let users = state.user_repo.list(page).await?;
    Ok(Json(users).into_response())
}

/// Open registration for riders and partners. Back-office accounts are
/// provisioned out of band.
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = required_text(&payload.name, "name")?;
    let email = required_text(&payload.email, "email")?;
    let phone = required_text(&payload.phone, "phone")?;

    let role = match payload.role.as_deref() {
        Some(raw) => match UserRole::parse(raw) {
            Some(role) if !role.is_back_office() => role,
            Some(_) => return Err(AppError::Forbidden("Cannot self-register a back-office role".into())),
            None => return Err(AppError::validation(format!("Unknown role: {raw}"))),
        },
        None => UserRole::Rider,
    };

    if state.user_repo.find_by_email(&email).await?.is_some() {
        return Err(AppError::duplicate_email(&email));
    }

    let user = NewUser {
        name,
        email,
        phone,
        role,
        address: payload.address.clone(),
        city: payload.city.clone(),
        profile_image: payload.profile_image.clone(),
    };

    let created = state.user_repo.create(&user).await?;
    info!("User {} registered ({:?})", created.id, created.role);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
    Query(query): Query<UserQuery>,
) -> Result<impl IntoResponse, AppError> {
    let raw_id = query.id.as_ref().ok_or_else(|| AppError::missing_field("id"))?;
    let id = parse_numeric("id", raw_id)?;

    let deleted = state
        .user_repo
        .delete(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))?;

    info!("User {} deleted", id);
    Ok(Json(deleted))
}
