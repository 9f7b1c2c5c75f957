use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Stable machine-readable codes surfaced in error bodies so the dashboards
/// can branch without parsing the human message.
pub mod codes {
    pub const VALIDATION: &str = "VALIDATION";
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const INVALID_VEHICLE_TYPE: &str = "INVALID_VEHICLE_TYPE";
    pub const INVALID_STATUS: &str = "INVALID_STATUS";
    pub const INVALID_STATUS_TRANSITION: &str = "INVALID_STATUS_TRANSITION";
    pub const PARTNER_NOT_FOUND: &str = "PARTNER_NOT_FOUND";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const DUPLICATE_REGISTRATION: &str = "DUPLICATE_REGISTRATION";
    pub const DUPLICATE_EMAIL: &str = "DUPLICATE_EMAIL";
    pub const DUPLICATE_COUPON_CODE: &str = "DUPLICATE_COUPON_CODE";
    pub const CONFLICT: &str = "CONFLICT";
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const PERSISTENCE: &str = "PERSISTENCE";
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("{message}")]
    Conflict { code: &'static str, message: String },
    #[error("{message}")]
    Validation { code: &'static str, message: String },
    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation { code: codes::VALIDATION, message: message.into() }
    }

    pub fn missing_field(field: &str) -> Self {
        AppError::Validation {
            code: codes::MISSING_FIELD,
            message: format!("Missing required field: {field}"),
        }
    }

    pub fn invalid_number(field: &str) -> Self {
        AppError::Validation {
            code: codes::INVALID_NUMBER,
            message: format!("Field {field} must be an integer"),
        }
    }

    pub fn invalid_vehicle_type(raw: &str) -> Self {
        AppError::Validation {
            code: codes::INVALID_VEHICLE_TYPE,
            message: format!("Unknown vehicle type: {raw}"),
        }
    }

    pub fn invalid_status(raw: &str) -> Self {
        AppError::Validation {
            code: codes::INVALID_STATUS,
            message: format!("Unknown status: {raw}"),
        }
    }

    pub fn invalid_transition(from: &str, to: &str) -> Self {
        AppError::Conflict {
            code: codes::INVALID_STATUS_TRANSITION,
            message: format!("Cannot move booking from {from} to {to}"),
        }
    }

    pub fn partner_not_found(partner_id: i64) -> Self {
        AppError::Validation {
            code: codes::PARTNER_NOT_FOUND,
            message: format!("Partner {partner_id} does not exist"),
        }
    }

    pub fn duplicate_registration(registration: &str) -> Self {
        AppError::Conflict {
            code: codes::DUPLICATE_REGISTRATION,
            message: format!("A vehicle with registration number {registration} already exists"),
        }
    }

    pub fn duplicate_email(email: &str) -> Self {
        AppError::Conflict {
            code: codes::DUPLICATE_EMAIL,
            message: format!("A user with email {email} already exists"),
        }
    }

    pub fn duplicate_coupon_code(code: &str) -> Self {
        AppError::Conflict {
            code: codes::DUPLICATE_COUPON_CODE,
            message: format!("A coupon with code {code} already exists"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error() {
                    let db_code = db_err.code().unwrap_or_default();

                    // 2067 = SQLite Unique Constraint
                    // 23505 = PostgreSQL Unique Violation
                    if db_code == "2067" || db_code == "23505" {
                        return (
                            StatusCode::CONFLICT,
                            Json(json!({
                                "error": "Resource already exists (duplicate entry)",
                                "code": codes::CONFLICT,
                            })),
                        )
                            .into_response();
                    }
                }

                error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    codes::PERSISTENCE,
                    "Internal server error".to_string(),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, codes::NOT_FOUND, msg.clone()),
            AppError::Unauthorized => {
                (StatusCode::UNAUTHORIZED, codes::UNAUTHORIZED, "Unauthorized".to_string())
            }
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, codes::FORBIDDEN, msg.clone()),
            AppError::Conflict { code, message } => (StatusCode::CONFLICT, *code, message.clone()),
            AppError::Validation { code, message } => {
                (StatusCode::BAD_REQUEST, *code, message.clone())
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::PERSISTENCE,
                "Internal error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
