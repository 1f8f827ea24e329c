//! Payment domain model, parameters and list row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    model::{
        metadata::Metadata,
        payment::{PaymentDto, PaymentParticipantDto},
    },
    server::{
        error::validation::ValidationErrors, model::upload::UploadedFile,
        util::validate::Validator,
    },
};

/// Size bounds of an uploaded receipt, in kilobytes.
pub const RECEIPT_SIZE_KB: (usize, usize) = (100, 500);

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub id: Uuid,
    pub participant_id: Uuid,
    /// Path relative to the public disk.
    pub file_path: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub is_verified: bool,
    pub metadata: Metadata,
    pub participant: Option<PaymentParticipantDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public URL of a file on the public disk.
pub fn public_url(app_url: &str, path: &str) -> String {
    format!("{}/storage/{}", app_url.trim_end_matches('/'), path)
}

impl Payment {
    pub fn from_entity(
        entity: entity::payment::Model,
        participant: Option<entity::participant::Model>,
    ) -> Self {
        Self {
            metadata: Metadata::from_json(entity.metadata.as_ref()),
            participant: participant
                .filter(|p| p.deleted_at.is_none())
                .map(|p| PaymentParticipantDto {
                    name: p.name,
                    email: p.email,
                }),
            id: entity.id,
            participant_id: entity.participant_id,
            file_path: entity.file_path,
            uploaded_at: entity.uploaded_at,
            is_verified: entity.is_verified,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    /// Converts to a DTO, expanding the stored path into a public URL.
    pub fn into_dto(self, app_url: &str) -> PaymentDto {
        PaymentDto {
            id: self.id,
            participant_id: self.participant_id,
            file_path: self.file_path.map(|path| public_url(app_url, &path)),
            uploaded_at: self.uploaded_at,
            is_verified: self.is_verified,
            metadata: (!self.metadata.is_empty()).then_some(self.metadata),
            participant: self.participant,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Raw multipart fields of a payment form.
#[derive(Debug, Clone, Default)]
pub struct PaymentForm {
    pub participant_id: Option<String>,
    pub uploaded_at: Option<String>,
    pub is_verified: Option<String>,
    pub metadata: Metadata,
    pub file: Option<UploadedFile>,
}

/// Validated create/update input.
#[derive(Debug, Clone)]
pub struct PaymentParams {
    pub participant_id: Uuid,
    pub uploaded_at: Option<DateTime<Utc>>,
    pub is_verified: Option<bool>,
    pub metadata: Metadata,
    pub file: Option<UploadedFile>,
}

impl PaymentParams {
    /// Validates the form; `require_file` is set on create.
    pub fn from_form(form: PaymentForm, require_file: bool) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let participant_id = match v.required("participant_id", form.participant_id.as_deref()) {
            Some(raw) => v.uuid("participant_id", Some(raw)),
            None => None,
        };

        let uploaded_at = v.date("uploaded_at", form.uploaded_at.as_deref());

        let is_verified = match form.is_verified.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = crate::server::util::parse::parse_bool(raw);
                if parsed.is_none() {
                    v.add("is_verified", "The is verified field must be true or false.");
                }
                parsed
            }
        };

        v.metadata("metadata", &form.metadata);

        match &form.file {
            Some(file) => {
                v.file(
                    "file_path",
                    &file.file_name,
                    file.bytes.len(),
                    &["pdf"],
                    Some(RECEIPT_SIZE_KB),
                );
            }
            None if require_file => {
                v.add("file_path", "The file path field is required.");
            }
            None => {}
        }

        v.finish()?;

        let Some(participant_id) = participant_id else {
            return Err(ValidationErrors::single(
                "participant_id",
                "The participant id field is required.",
            ));
        };

        Ok(Self {
            participant_id,
            uploaded_at,
            is_verified,
            metadata: form.metadata,
            file: form.file,
        })
    }
}

/// Payment joined with its participant.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRow {
    #[serde(flatten)]
    pub payment: entity::payment::Model,
    #[serde(skip)]
    pub participant: Option<entity::participant::Model>,
}

impl From<(entity::payment::Model, Option<entity::participant::Model>)> for PaymentRow {
    fn from(
        (payment, participant): (entity::payment::Model, Option<entity::participant::Model>),
    ) -> Self {
        Self {
            payment,
            participant: participant.filter(|p| p.deleted_at.is_none()),
        }
    }
}
