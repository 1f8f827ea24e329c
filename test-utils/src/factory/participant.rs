//! Participant factory for creating test participant entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test participants attached to a seminar.
pub struct ParticipantFactory<'a> {
    db: &'a DatabaseConnection,
    seminar_id: Uuid,
    name: String,
    email: String,
    registered_at: Option<DateTime<Utc>>,
    is_confirmed: Option<bool>,
    created_at: DateTime<Utc>,
}

impl<'a> ParticipantFactory<'a> {
    /// Creates a new ParticipantFactory with defaults `"Participant {id}"` and
    /// `"participant{id}@example.com"`.
    pub fn new(db: &'a DatabaseConnection, seminar_id: Uuid) -> Self {
        let id = next_id();
        Self {
            db,
            seminar_id,
            name: format!("Participant {}", id),
            email: format!("participant{}@example.com", id),
            registered_at: None,
            is_confirmed: None,
            created_at: Utc::now(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn registered_at(mut self, registered_at: DateTime<Utc>) -> Self {
        self.registered_at = Some(registered_at);
        self
    }

    pub fn is_confirmed(mut self, is_confirmed: bool) -> Self {
        self.is_confirmed = Some(is_confirmed);
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the participant entity into the database.
    pub async fn build(self) -> Result<entity::participant::Model, DbErr> {
        entity::participant::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            seminar_id: ActiveValue::Set(self.seminar_id),
            name: ActiveValue::Set(self.name),
            email: ActiveValue::Set(self.email),
            registered_at: ActiveValue::Set(self.registered_at),
            extra_data: ActiveValue::Set(None),
            is_confirmed: ActiveValue::Set(self.is_confirmed),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a participant of `seminar_id` with default values.
pub async fn create_participant(
    db: &DatabaseConnection,
    seminar_id: Uuid,
) -> Result<entity::participant::Model, DbErr> {
    ParticipantFactory::new(db, seminar_id).build().await
}
