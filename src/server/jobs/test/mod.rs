use entity::sea_orm_active_enums::{JobKind, JobStatus};
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryOrder};
use test_utils::{
    builder::TestBuilder,
    factory::{self, download_export::DownloadExportFactory, seminar::SeminarFactory},
};

use crate::server::{
    config::JobConfig,
    error::job::JobError,
    jobs::{queue::handle, sheet, ExportHeader, JobContext, JobQueue, JobTask},
    storage::{Disk, Storage},
};

mod queue;

fn context(db: &DatabaseConnection, root: &std::path::Path) -> JobContext {
    JobContext {
        db: db.clone(),
        storage: Storage::new(root),
        app_url: "http://localhost:8080".to_string(),
    }
}

async fn job_record(db: &DatabaseConnection, task: &JobTask) -> Result<i32, DbErr> {
    let mut factory = DownloadExportFactory::new(db)
        .name(task.name())
        .kind(task.kind())
        .payload(task.to_payload().unwrap());
    if let Some(path) = task.source_path() {
        factory = factory.path(path);
    }
    Ok(factory.build().await?.id)
}

async fn find_job(
    db: &DatabaseConnection,
    id: i32,
) -> Result<entity::download_export::Model, DbErr> {
    entity::prelude::DownloadExport::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| DbErr::RecordNotFound(format!("job {}", id)))
}
