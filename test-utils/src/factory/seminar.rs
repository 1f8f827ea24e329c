//! Seminar factory for creating test seminar entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test seminars with customizable fields.
pub struct SeminarFactory<'a> {
    db: &'a DatabaseConnection,
    title: String,
    description: Option<String>,
    schedule: DateTime<Utc>,
    is_active: bool,
    additional_info: Option<serde_json::Value>,
    user_id: Option<i32>,
    created_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl<'a> SeminarFactory<'a> {
    /// Creates a new SeminarFactory with default values.
    ///
    /// Defaults:
    /// - title: `"Seminar {id}"`
    /// - schedule: one week from now
    /// - is_active: `false`
    /// - user_id: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            title: format!("Seminar {}", id),
            description: None,
            schedule: now + Duration::days(7),
            is_active: false,
            additional_info: None,
            user_id: None,
            created_at: now,
            deleted_at: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn schedule(mut self, schedule: DateTime<Utc>) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }

    pub fn additional_info(mut self, info: serde_json::Value) -> Self {
        self.additional_info = Some(info);
        self
    }

    pub fn user_id(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Marks the seminar as soft-deleted.
    pub fn deleted(mut self) -> Self {
        self.deleted_at = Some(Utc::now());
        self
    }

    /// Builds and inserts the seminar entity into the database.
    pub async fn build(self) -> Result<entity::seminar::Model, DbErr> {
        entity::seminar::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            schedule: ActiveValue::Set(self.schedule),
            is_active: ActiveValue::Set(self.is_active),
            additional_info: ActiveValue::Set(self.additional_info),
            user_id: ActiveValue::Set(self.user_id),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(self.deleted_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a seminar owned by `user_id` with default values.
pub async fn create_seminar(
    db: &DatabaseConnection,
    user_id: Option<i32>,
) -> Result<entity::seminar::Model, DbErr> {
    SeminarFactory::new(db).user_id(user_id).build().await
}
