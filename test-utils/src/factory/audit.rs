//! Audit row factory.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::AuditEvent;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for audit rows pointing at an arbitrary target.
pub struct AuditFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: Option<i32>,
    event: AuditEvent,
    auditable_type: String,
    auditable_id: String,
    created_at: DateTime<Utc>,
}

impl<'a> AuditFactory<'a> {
    /// Creates a `created` audit row for the given target slug and id.
    pub fn new(
        db: &'a DatabaseConnection,
        auditable_type: impl Into<String>,
        auditable_id: impl Into<String>,
    ) -> Self {
        Self {
            db,
            user_id: None,
            event: AuditEvent::Created,
            auditable_type: auditable_type.into(),
            auditable_id: auditable_id.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user_id(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn event(mut self, event: AuditEvent) -> Self {
        self.event = event;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the audit row.
    pub async fn build(self) -> Result<entity::audit::Model, DbErr> {
        entity::audit::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            event: ActiveValue::Set(self.event),
            auditable_type: ActiveValue::Set(self.auditable_type),
            auditable_id: ActiveValue::Set(self.auditable_id),
            old_values: ActiveValue::Set(None),
            new_values: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
