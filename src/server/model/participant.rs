//! Participant domain model, parameters and list row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    model::{
        metadata::Metadata,
        participant::{ParticipantDto, ParticipantFormDto},
    },
    server::{
        error::validation::ValidationErrors,
        util::validate::{Validator, MAX_STRING},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: Uuid,
    pub seminar_id: Uuid,
    pub name: String,
    pub email: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub is_confirmed: Option<bool>,
    pub extra_data: Metadata,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Participant {
    pub fn from_entity(entity: entity::participant::Model) -> Self {
        Self {
            extra_data: Metadata::from_json(entity.extra_data.as_ref()),
            id: entity.id,
            seminar_id: entity.seminar_id,
            name: entity.name,
            email: entity.email,
            registered_at: entity.registered_at,
            is_confirmed: entity.is_confirmed,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> ParticipantDto {
        ParticipantDto {
            id: self.id,
            seminar_id: self.seminar_id,
            name: self.name,
            email: self.email,
            registered_at: self.registered_at,
            is_confirmed: self.is_confirmed,
            extra_data: (!self.extra_data.is_empty()).then_some(self.extra_data),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated create/update input. The seminar's existence is checked by the service.
#[derive(Debug, Clone)]
pub struct ParticipantParams {
    pub seminar_id: Uuid,
    pub name: String,
    pub email: String,
    pub registered_at: Option<DateTime<Utc>>,
    pub is_confirmed: Option<bool>,
    pub extra_data: Metadata,
}

impl ParticipantParams {
    pub fn from_dto(dto: ParticipantFormDto) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let seminar_id = match v.required("seminar_id", dto.seminar_id.as_deref()) {
            Some(raw) => v.uuid("seminar_id", Some(raw)),
            None => None,
        };

        let name = v.required("name", dto.name.as_deref()).map(str::to_string);
        v.max_chars("name", name.as_deref(), MAX_STRING);

        let email = v.required("email", dto.email.as_deref()).map(str::to_string);
        v.email("email", email.as_deref())
            .max_chars("email", email.as_deref(), MAX_STRING);

        let registered_at = v.date("registered_at", dto.registered_at.as_deref());

        let extra_data = dto.extra_data.unwrap_or_default();
        v.metadata("extra_data", &extra_data);

        v.finish()?;

        let (Some(seminar_id), Some(name), Some(email)) = (seminar_id, name, email) else {
            return Err(ValidationErrors::single("seminar_id", "The seminar id field is required."));
        };

        Ok(Self {
            seminar_id,
            name,
            email,
            registered_at,
            is_confirmed: dto.is_confirmed,
            extra_data,
        })
    }
}

/// Participant joined with its seminar.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantRow {
    #[serde(flatten)]
    pub participant: entity::participant::Model,
    #[serde(skip)]
    pub seminar: Option<entity::seminar::Model>,
}

impl From<(entity::participant::Model, Option<entity::seminar::Model>)> for ParticipantRow {
    fn from(
        (participant, seminar): (entity::participant::Model, Option<entity::seminar::Model>),
    ) -> Self {
        Self {
            participant,
            seminar: seminar.filter(|s| s.deleted_at.is_none()),
        }
    }
}
