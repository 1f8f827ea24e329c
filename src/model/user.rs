use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    /// Role name
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and update body; `password` may be omitted on update.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UserFormDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role_id: Option<i32>,
    pub password: Option<String>,
    pub password_confirmation: Option<String>,
}
