use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::metadata::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SeminarDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub schedule: DateTime<Utc>,
    pub is_active: bool,
    pub additional_info: Option<Metadata>,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and update body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SeminarFormDto {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Y-m-d H:i`, `Y-m-d` or RFC 3339
    pub schedule: Option<String>,
    pub is_active: Option<bool>,
    pub additional_info: Option<Metadata>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SeminarStatusDto {
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SeminarStatusResponseDto {
    pub message: String,
    pub is_active: bool,
}
