//! Job record repository.
//!
//! Job records are created `pending` by the request handler and finalised exactly
//! once by a worker. Finalising writes only touch rows that are not yet
//! `completed`, so a late retry can never overwrite a finished job.

use chrono::{DateTime, Utc};
use entity::{
    download_export,
    sea_orm_active_enums::{JobKind, JobStatus},
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder,
};
use serde_json::{json, Value};

use crate::server::{
    datatable::{DataTable, Field, ListParams, Page},
    util::parse::format_datetime,
};

pub struct DownloadExportRepository<'a> {
    db: &'a DatabaseConnection,
}

/// Fields of a new pending job record.
#[derive(Debug, Clone)]
pub struct NewJobRecord {
    pub name: String,
    pub kind: JobKind,
    pub path: Option<String>,
    pub user_id: Option<i32>,
    pub payload: Value,
}

/// URL that streams a job's artifact.
pub fn download_url(app_url: &str, id: i32) -> String {
    format!(
        "{}/api/dashboard/downloads/{}/download",
        app_url.trim_end_matches('/'),
        id
    )
}

/// Dashboard list columns.
pub fn download_table(app_url: &str) -> DataTable<download_export::Model> {
    let app_url = app_url.to_string();

    DataTable::new(Expr::col((
        download_export::Entity,
        download_export::Column::CreatedAt,
    )))
    .column(
        Field::new("name").column(Expr::col((download_export::Entity, download_export::Column::Name))),
    )
    .column(Field::new("link").render(move |row: &download_export::Model| {
        row.path
            .as_ref()
            .map(|_| json!(download_url(&app_url, row.id)))
            .unwrap_or(Value::Null)
    }))
    .column(
        Field::new("created_at")
            .column(Expr::col((download_export::Entity, download_export::Column::CreatedAt)))
            .searchable(false)
            .render(|row: &download_export::Model| json!(format_datetime(&row.created_at))),
    )
    .column(
        Field::new("finished_at")
            .column(Expr::col((download_export::Entity, download_export::Column::FinishedAt)))
            .searchable(false)
            .render(|row: &download_export::Model| {
                row.finished_at
                    .as_ref()
                    .map(|at| json!(format_datetime(at)))
                    .unwrap_or(Value::Null)
            }),
    )
    .column(
        Field::new("type")
            .column(Expr::col((download_export::Entity, download_export::Column::Kind)))
            .searchable(false)
            .render(|row: &download_export::Model| match row.kind {
                JobKind::Import => json!("Import"),
                JobKind::Export => json!("Export"),
            }),
    )
    .column(
        Field::new("status")
            .column(Expr::col((download_export::Entity, download_export::Column::Status))),
    )
}

impl<'a> DownloadExportRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, params: &ListParams, app_url: &str) -> Result<Page, DbErr> {
        download_table(app_url)
            .fetch(self.db, entity::prelude::DownloadExport::find(), params)
            .await
    }

    /// Inserts a `pending` job record.
    pub async fn create(&self, record: NewJobRecord) -> Result<download_export::Model, DbErr> {
        let now = Utc::now();

        download_export::ActiveModel {
            name: ActiveValue::Set(record.name),
            kind: ActiveValue::Set(record.kind),
            path: ActiveValue::Set(record.path),
            status: ActiveValue::Set(JobStatus::Pending),
            error: ActiveValue::Set(None),
            user_id: ActiveValue::Set(record.user_id),
            payload: ActiveValue::Set(record.payload),
            finished_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<download_export::Model>, DbErr> {
        entity::prelude::DownloadExport::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<download_export::Model>, DbErr> {
        entity::prelude::DownloadExport::find()
            .filter(download_export::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await
    }

    /// Marks a job completed, storing `path` when the task produced one.
    ///
    /// # Returns
    /// - `Ok(true)` - Record finalised
    /// - `Ok(false)` - Record missing or already completed; nothing written
    /// - `Err(DbErr)` - Database error
    pub async fn mark_completed(
        &self,
        id: i32,
        path: Option<String>,
        finished_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let mut update = entity::prelude::DownloadExport::update_many()
            .col_expr(
                download_export::Column::Status,
                Expr::value(JobStatus::Completed),
            )
            .col_expr(download_export::Column::Error, Expr::value(Option::<String>::None))
            .col_expr(download_export::Column::FinishedAt, Expr::value(finished_at))
            .col_expr(download_export::Column::UpdatedAt, Expr::value(finished_at));

        if let Some(path) = path {
            update = update.col_expr(download_export::Column::Path, Expr::value(path));
        }

        let result = update
            .filter(download_export::Column::Id.eq(id))
            .filter(download_export::Column::Status.ne(JobStatus::Completed))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Marks a job failed with `error`.
    ///
    /// # Returns
    /// - `Ok(true)` - Record updated
    /// - `Ok(false)` - Record missing or already completed; nothing written
    /// - `Err(DbErr)` - Database error
    pub async fn mark_failed(
        &self,
        id: i32,
        error: &str,
        finished_at: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::DownloadExport::update_many()
            .col_expr(download_export::Column::Status, Expr::value(JobStatus::Failed))
            .col_expr(download_export::Column::Error, Expr::value(error))
            .col_expr(download_export::Column::FinishedAt, Expr::value(finished_at))
            .col_expr(download_export::Column::UpdatedAt, Expr::value(finished_at))
            .filter(download_export::Column::Id.eq(id))
            .filter(download_export::Column::Status.ne(JobStatus::Completed))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Pending records created before `before`, oldest first.
    pub async fn find_stale_pending(
        &self,
        before: DateTime<Utc>,
    ) -> Result<Vec<download_export::Model>, DbErr> {
        entity::prelude::DownloadExport::find()
            .filter(download_export::Column::Status.eq(JobStatus::Pending))
            .filter(download_export::Column::CreatedAt.lt(before))
            .order_by_asc(download_export::Column::CreatedAt)
            .all(self.db)
            .await
    }

    /// Hard-deletes job records, returning how many were removed.
    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        let result = entity::prelude::DownloadExport::delete_many()
            .filter(download_export::Column::Id.is_in(ids.iter().copied()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
