use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::metadata::Metadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentParticipantDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: Uuid,
    pub participant_id: Uuid,
    /// Public URL of the uploaded receipt
    pub file_path: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub metadata: Option<Metadata>,
    pub participant: Option<PaymentParticipantDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Multipart create and update body, documented for the OpenAPI schema.
///
/// Metadata entries are sent as `metadata[<key>]` fields.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct PaymentFormDto {
    pub participant_id: String,
    pub uploaded_at: Option<String>,
    pub is_verified: Option<bool>,
    /// PDF receipt between 100 and 500 KB
    #[schema(value_type = Option<String>, format = Binary)]
    pub file_path: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PaymentStatusDto {
    pub is_verified: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PaymentStatusResponseDto {
    pub message: String,
    pub is_verified: bool,
}

/// Multipart body of every import endpoint.
#[allow(dead_code)]
#[derive(Debug, ToSchema)]
pub struct ImportFileDto {
    /// `.xlsx` or `.csv` spreadsheet
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
