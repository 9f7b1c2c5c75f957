use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::sync::Arc;
use tracing::Span;

use crate::domain::models::auth::Claims;
use crate::domain::models::user::UserRole;
use crate::error::AppError;
use crate::state::AppState;

/// Verified bearer-token identity. Tokens are minted by the external auth
/// service; this extractor is the only place they are checked.
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.0.sub.parse().map_err(|_| AppError::Unauthorized)
    }

    pub fn role(&self) -> Option<UserRole> {
        UserRole::parse(&self.0.role)
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        let token = header_value.strip_prefix("Bearer ").ok_or(AppError::Unauthorized)?;

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        let decoding_key = DecodingKey::from_secret(app_state.config.jwt_secret.as_bytes());
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[app_state.config.auth_issuer.as_str()]);

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(|_| AppError::Unauthorized)?;

        Span::current().record("user_id", token_data.claims.sub.as_str());

        Ok(AuthUser(token_data.claims))
    }
}

/// Back-office identity: admin or staff role required.
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthUser(claims) = AuthUser::from_request_parts(parts, state).await?;

        match UserRole::parse(&claims.role) {
            Some(role) if role.is_back_office() => Ok(AdminUser(claims)),
            _ => Err(AppError::Forbidden("Back-office role required".into())),
        }
    }
}
