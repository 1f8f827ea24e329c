//! Seminar domain model, parameters and list row.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    model::{
        metadata::Metadata,
        seminar::{SeminarDto, SeminarFormDto},
    },
    server::{
        error::validation::ValidationErrors,
        util::validate::{Validator, MAX_STRING},
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Seminar {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub schedule: DateTime<Utc>,
    pub is_active: bool,
    pub additional_info: Metadata,
    pub user_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seminar {
    /// Converts an entity model to a domain model at the repository boundary.
    pub fn from_entity(entity: entity::seminar::Model) -> Self {
        Self {
            additional_info: Metadata::from_json(entity.additional_info.as_ref()),
            id: entity.id,
            title: entity.title,
            description: entity.description,
            schedule: entity.schedule,
            is_active: entity.is_active,
            user_id: entity.user_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> SeminarDto {
        SeminarDto {
            id: self.id,
            title: self.title,
            description: self.description,
            schedule: self.schedule,
            is_active: self.is_active,
            additional_info: (!self.additional_info.is_empty()).then_some(self.additional_info),
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated create/update input.
#[derive(Debug, Clone)]
pub struct SeminarParams {
    pub title: String,
    pub description: Option<String>,
    pub schedule: DateTime<Utc>,
    /// `None` leaves the stored flag unchanged on update and means `false` on create.
    pub is_active: Option<bool>,
    pub additional_info: Metadata,
}

impl SeminarParams {
    /// Applies `title: required|max:255`, `schedule: required|date` and the
    /// metadata value rule.
    pub fn from_dto(dto: SeminarFormDto) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let title = v.required("title", dto.title.as_deref()).map(str::to_string);
        v.max_chars("title", title.as_deref(), MAX_STRING);

        let schedule = match v.required("schedule", dto.schedule.as_deref()) {
            Some(raw) => v.date("schedule", Some(raw)),
            None => None,
        };

        let additional_info = dto.additional_info.unwrap_or_default();
        v.metadata("additional_info", &additional_info);

        v.finish()?;

        let (Some(title), Some(schedule)) = (title, schedule) else {
            return Err(ValidationErrors::single("schedule", "The schedule field is required."));
        };

        Ok(Self {
            title,
            description: dto.description.filter(|d| !d.trim().is_empty()),
            schedule,
            is_active: dto.is_active,
            additional_info,
        })
    }
}

/// Seminar joined with its owner, as listed in the dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct SeminarRow {
    #[serde(flatten)]
    pub seminar: entity::seminar::Model,
    #[serde(skip)]
    pub owner: Option<entity::user::Model>,
}

impl From<(entity::seminar::Model, Option<entity::user::Model>)> for SeminarRow {
    fn from((seminar, owner): (entity::seminar::Model, Option<entity::user::Model>)) -> Self {
        Self {
            seminar,
            owner: owner.filter(|user| user.deleted_at.is_none()),
        }
    }
}
