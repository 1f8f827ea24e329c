//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through
//! Axum's state extraction. All fields are cheap to clone: the database connection
//! is a pool, `Storage` holds a path and `JobQueue` wraps a channel sender.

use sea_orm::DatabaseConnection;

use crate::server::{jobs::JobQueue, storage::Storage};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Private and public file disks for uploads and exported artifacts.
    pub storage: Storage,

    /// Background export and import workers.
    pub jobs: JobQueue,

    /// Application base URL for receipt and download links.
    pub app_url: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `storage` - File storage rooted at `STORAGE_PATH`
    /// - `jobs` - Running job queue
    /// - `app_url` - Application base URL
    pub fn new(db: DatabaseConnection, storage: Storage, jobs: JobQueue, app_url: String) -> Self {
        Self {
            db,
            storage,
            jobs,
            app_url,
        }
    }
}
