//! Hands export and import requests to the background job queue.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{
    model::api::ExportHeaderDto,
    server::{
        data::download_export::{DownloadExportRepository, NewJobRecord},
        error::{validation::ValidationErrors, AppError},
        jobs::{ExportHeader, JobQueue, JobTask},
        model::upload::UploadedFile,
        storage::{Disk, Storage},
        util::validate::Validator,
    },
};

/// Accepted import file types.
const IMPORT_EXTENSIONS: [&str; 2] = ["xlsx", "csv"];

/// Validates export headers: the list must be non-empty and each entry needs a
/// value and a label.
pub fn export_headers(
    headers: Option<Vec<ExportHeaderDto>>,
) -> Result<Vec<ExportHeader>, ValidationErrors> {
    let Some(headers) = headers.filter(|h| !h.is_empty()) else {
        return Err(ValidationErrors::single(
            "headers",
            "The headers field is required.",
        ));
    };

    let mut v = Validator::new();
    let mut parsed = Vec::with_capacity(headers.len());
    for (index, header) in headers.into_iter().enumerate() {
        let value = v
            .required(&format!("headers.{}.value", index), header.value.as_deref())
            .map(str::to_string);
        let label = v
            .required(&format!("headers.{}.label", index), header.label.as_deref())
            .map(str::to_string);

        if let (Some(value), Some(label)) = (value, label) {
            parsed.push(ExportHeader { value, label });
        }
    }

    v.finish()?;

    Ok(parsed)
}

pub struct JobService<'a> {
    db: &'a DatabaseConnection,
    queue: &'a JobQueue,
}

impl<'a> JobService<'a> {
    pub fn new(db: &'a DatabaseConnection, queue: &'a JobQueue) -> Self {
        Self { db, queue }
    }

    /// Records a pending job for `task` and queues it.
    ///
    /// # Returns
    /// - `Ok(i32)` - Id of the job record
    /// - `Err(AppError)` - Record insert failed or the queue is closed
    pub async fn dispatch(&self, task: JobTask, user_id: Option<i32>) -> Result<i32, AppError> {
        let job = DownloadExportRepository::new(self.db)
            .create(NewJobRecord {
                name: task.name().to_string(),
                kind: task.kind(),
                path: task.source_path().map(str::to_string),
                user_id,
                payload: task.to_payload()?,
            })
            .await?;

        self.queue.dispatch(job.id, task).await?;

        Ok(job.id)
    }
}

/// Stores an import upload at `<dir>/imported/<uuid>.<ext>` on the private disk.
///
/// # Returns
/// - `Ok(String)` - Disk-relative path of the stored file
/// - `Err(AppError::Validation)` - Missing file or not xlsx/csv
pub async fn store_import(
    storage: &Storage,
    dir: &str,
    file: Option<UploadedFile>,
) -> Result<String, AppError> {
    let Some(file) = file else {
        return Err(ValidationErrors::single("file", "The file field is required.").into());
    };

    let mut v = Validator::new();
    v.file("file", &file.file_name, file.bytes.len(), &IMPORT_EXTENSIONS, None);
    v.finish()?;

    let path = format!(
        "{}/imported/{}.{}",
        dir,
        Uuid::new_v4().simple(),
        file.extension()
    );
    storage.put(Disk::Private, &path, &file.bytes).await?;

    Ok(path)
}
