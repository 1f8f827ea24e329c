use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Body of every plain success or error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Bulk soft-delete request for UUID-keyed entities.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UuidBulkDestroyDto {
    #[serde(default)]
    pub ids: Vec<Uuid>,
}

/// Bulk delete request for integer-keyed entities.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct IdBulkDestroyDto {
    #[serde(default)]
    pub ids: Vec<i32>,
}

/// One requested export column: `value` is the row key, `label` the header text.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExportHeaderDto {
    pub value: Option<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ExportRequestDto {
    pub headers: Option<Vec<ExportHeaderDto>>,
}
