//! User domain model, parameters and list row.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    model::user::{UserDto, UserFormDto},
    server::{
        error::validation::ValidationErrors,
        util::validate::{Validator, MAX_STRING},
    },
};

/// Minimum password length.
pub const MIN_PASSWORD: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role_id: Option<i32>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn from_entity(entity: entity::user::Model, role: Option<entity::role::Model>) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            email: entity.email,
            role_id: entity.role_id,
            role: role.filter(|r| r.deleted_at.is_none()).map(|r| r.name),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            name: self.name,
            email: self.email,
            role_id: self.role_id,
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Validated create/update input. Email uniqueness and role existence are
/// checked by the service.
#[derive(Debug, Clone)]
pub struct UserParams {
    pub name: String,
    pub email: String,
    pub role_id: i32,
    /// Plain-text password; `None` keeps the stored hash on update.
    pub password: Option<String>,
}

impl UserParams {
    pub fn from_dto(dto: UserFormDto, require_password: bool) -> Result<Self, ValidationErrors> {
        let mut v = Validator::new();

        let name = v.required("name", dto.name.as_deref()).map(str::to_string);
        v.max_chars("name", name.as_deref(), MAX_STRING);

        let email = v.required("email", dto.email.as_deref()).map(str::to_string);
        v.email("email", email.as_deref())
            .max_chars("email", email.as_deref(), MAX_STRING);

        let role_id = v.present("role_id", dto.role_id);

        let password = dto.password.filter(|p| !p.is_empty());
        if require_password {
            v.present("password", password.as_deref());
        }
        v.min_chars("password", password.as_deref(), MIN_PASSWORD)
            .confirmed(
                "password",
                password.as_deref(),
                dto.password_confirmation.as_deref(),
            );

        v.finish()?;

        let (Some(name), Some(email), Some(role_id)) = (name, email, role_id) else {
            return Err(ValidationErrors::single("name", "The name field is required."));
        };

        Ok(Self {
            name,
            email,
            role_id,
            password,
        })
    }
}

/// User joined with its role.
#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    #[serde(flatten)]
    pub user: entity::user::Model,
    #[serde(skip)]
    pub role: Option<entity::role::Model>,
}

impl From<(entity::user::Model, Option<entity::role::Model>)> for UserRow {
    fn from((user, role): (entity::user::Model, Option<entity::role::Model>)) -> Self {
        Self {
            user,
            role: role.filter(|r| r.deleted_at.is_none()),
        }
    }
}
