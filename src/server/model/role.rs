//! Role domain model and parameters.

use chrono::{DateTime, Utc};

use crate::{
    model::role::{RoleDto, RoleFormDto},
    server::{
        error::validation::ValidationErrors,
        util::{
            parse::slugify,
            validate::{Validator, MAX_STRING},
        },
    },
};

/// Guard every role belongs to.
pub const GUARD_NAME: &str = "web";

/// Slug of the role that grants administrative access.
pub const ADMIN_ROLE_SLUG: &str = "administrator";

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub guard_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    pub fn from_entity(entity: entity::role::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            guard_name: entity.guard_name,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> RoleDto {
        RoleDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            guard_name: self.guard_name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated create/update input; the slug is derived from the name.
#[derive(Debug, Clone)]
pub struct RoleParams {
    pub name: String,
    pub slug: String,
}

impl RoleParams {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            slug: slugify(&name),
            name,
        }
    }

    pub fn from_dto(dto: RoleFormDto) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let name = v.required("name", dto.name.as_deref()).map(str::to_string);
        v.max_chars("name", name.as_deref(), MAX_STRING);

        v.finish()?;

        name.map(Self::new)
            .ok_or_else(|| ValidationErrors::single("name", "The name field is required."))
    }
}
