//! Job record factory.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{JobKind, JobStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating job records in any state.
pub struct DownloadExportFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    kind: JobKind,
    status: JobStatus,
    path: Option<String>,
    user_id: Option<i32>,
    payload: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl<'a> DownloadExportFactory<'a> {
    /// Creates a pending export record with an empty payload.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            name: "Seminar Download".to_string(),
            kind: JobKind::Export,
            status: JobStatus::Pending,
            path: None,
            user_id: None,
            payload: serde_json::json!({}),
            created_at: Utc::now(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn kind(mut self, kind: JobKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn status(mut self, status: JobStatus) -> Self {
        self.status = status;
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn user_id(mut self, user_id: Option<i32>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the job record.
    pub async fn build(self) -> Result<entity::download_export::Model, DbErr> {
        let finished_at = match self.status {
            JobStatus::Pending => None,
            _ => Some(self.created_at),
        };

        entity::download_export::ActiveModel {
            name: ActiveValue::Set(self.name),
            kind: ActiveValue::Set(self.kind),
            path: ActiveValue::Set(self.path),
            status: ActiveValue::Set(self.status),
            error: ActiveValue::Set(None),
            user_id: ActiveValue::Set(self.user_id),
            payload: ActiveValue::Set(self.payload),
            finished_at: ActiveValue::Set(finished_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending export record.
pub async fn create_download_export(
    db: &DatabaseConnection,
) -> Result<entity::download_export::Model, DbErr> {
    DownloadExportFactory::new(db).build().await
}
