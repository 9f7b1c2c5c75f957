use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "TEXT", rename_all = "lowercase")]
pub enum UserRole {
    Rider,
    Partner,
    Admin,
    Staff,
}

impl UserRole {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "rider" => Some(UserRole::Rider),
            "partner" => Some(UserRole::Partner),
            "admin" => Some(UserRole::Admin),
            "staff" => Some(UserRole::Staff),
            _ => None,
        }
    }

    /// Admin and staff accounts share the back-office permissions.
    pub fn is_back_office(&self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Staff)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub address: Option<String>,
    pub city: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub address: Option<String>,
    pub city: Option<String>,
    pub profile_image: Option<String>,
}
