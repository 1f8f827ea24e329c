use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Pagination metadata of a list response.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListMetaDto {
    pub current_page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

/// Envelope returned by every `data` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListResponseDto {
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Map<String, Value>>,
    pub meta: ListMetaDto,
}
