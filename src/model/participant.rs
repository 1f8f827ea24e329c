use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::metadata::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ParticipantDto {
    pub id: Uuid,
    pub seminar_id: Uuid,
    pub name: String,
    pub email: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub is_confirmed: Option<bool>,
    pub extra_data: Option<Metadata>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create and update body.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ParticipantFormDto {
    pub seminar_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub registered_at: Option<String>,
    pub is_confirmed: Option<bool>,
    pub extra_data: Option<Metadata>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ParticipantStatusDto {
    pub is_confirmed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ParticipantStatusResponseDto {
    pub message: String,
    pub is_confirmed: bool,
}
