//! Job record listing, artifact downloads and cleanup.

use std::path::PathBuf;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::download_export::DownloadExportRepository,
    datatable::{ListParams, Page},
    error::AppError,
    service::require_ids,
    storage::{Disk, Storage},
};

/// A stored artifact ready to be streamed.
pub struct Artifact {
    pub path: PathBuf,
    pub file_name: String,
}

pub struct DownloadService<'a> {
    db: &'a DatabaseConnection,
    storage: &'a Storage,
}

impl<'a> DownloadService<'a> {
    pub fn new(db: &'a DatabaseConnection, storage: &'a Storage) -> Self {
        Self { db, storage }
    }

    pub async fn list(&self, params: &ListParams, app_url: &str) -> Result<Page, AppError> {
        Ok(DownloadExportRepository::new(self.db)
            .list(params, app_url)
            .await?)
    }

    /// Resolves a job's artifact on the private disk.
    ///
    /// # Returns
    /// - `Ok(Artifact)` - File exists
    /// - `Err(AppError::NotFound)` - Unknown job, no path yet, or file missing
    pub async fn artifact(&self, id: i32) -> Result<Artifact, AppError> {
        let job = DownloadExportRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(file_not_found)?;

        let relative = job.path.ok_or_else(file_not_found)?;
        if !self.storage.exists(Disk::Private, &relative).await {
            return Err(file_not_found());
        }

        let path = self.storage.path(Disk::Private, &relative)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("download")
            .to_string();

        Ok(Artifact { path, file_name })
    }

    /// Deletes a job record and its artifact.
    pub async fn destroy(&self, id: i32) -> Result<(), AppError> {
        self.bulk_destroy(&[id]).await.map(|_| ())
    }

    /// Deletes job records and their artifacts.
    ///
    /// Every id must exist; otherwise nothing is deleted.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of records deleted
    /// - `Err(AppError::BadRequest)` - `ids` is empty
    /// - `Err(AppError::NotFound)` - Some id does not exist
    pub async fn bulk_destroy(&self, ids: &[i32]) -> Result<u64, AppError> {
        require_ids(ids)?;

        let repo = DownloadExportRepository::new(self.db);
        let jobs = repo.find_by_ids(ids).await?;

        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();
        if jobs.len() != unique.len() {
            return Err(AppError::NotFound("Download export not found".to_string()));
        }

        for job in &jobs {
            let Some(path) = job.path.as_deref() else {
                continue;
            };
            match self.storage.delete(Disk::Private, path).await {
                Ok(_) => {}
                Err(e) => tracing::warn!(job_id = job.id, "Failed to delete artifact: {}", e),
            }
        }

        Ok(repo.delete_many(ids).await?)
    }
}

fn file_not_found() -> AppError {
    AppError::NotFound("File not found.".to_string())
}
