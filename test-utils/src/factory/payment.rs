//! Payment factory for creating test payment entities.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};
use uuid::Uuid;

/// Factory for creating test payments attached to a participant.
pub struct PaymentFactory<'a> {
    db: &'a DatabaseConnection,
    participant_id: Uuid,
    file_path: Option<String>,
    is_verified: bool,
    created_at: DateTime<Utc>,
}

impl<'a> PaymentFactory<'a> {
    /// Creates a new PaymentFactory: no file, unverified.
    pub fn new(db: &'a DatabaseConnection, participant_id: Uuid) -> Self {
        Self {
            db,
            participant_id,
            file_path: None,
            is_verified: false,
            created_at: Utc::now(),
        }
    }

    pub fn file_path(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }

    pub fn is_verified(mut self, is_verified: bool) -> Self {
        self.is_verified = is_verified;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the payment entity into the database.
    pub async fn build(self) -> Result<entity::payment::Model, DbErr> {
        entity::payment::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            participant_id: ActiveValue::Set(self.participant_id),
            file_path: ActiveValue::Set(self.file_path),
            uploaded_at: ActiveValue::Set(Some(self.created_at)),
            is_verified: ActiveValue::Set(self.is_verified),
            metadata: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            deleted_at: ActiveValue::Set(None),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a payment for `participant_id` with default values.
pub async fn create_payment(
    db: &DatabaseConnection,
    participant_id: Uuid,
) -> Result<entity::payment::Model, DbErr> {
    PaymentFactory::new(db, participant_id).build().await
}
