//! Background export and import jobs.
//!
//! Request handlers create a `pending` job record, then hand a typed [`JobTask`] to
//! the [`JobQueue`] and return immediately. Workers run the task and finalise the
//! record: `completed` with the artifact path, or `failed` with the error text.
//! Failed attempts are retried by the queue up to the configured attempt budget.
//!
//! - `task` - Job descriptors persisted as the record payload
//! - `queue` - Worker pool, record finalisation and retries
//! - `export` / `import` - Per-entity spreadsheet routines
//! - `sheet` - Adapters over the spreadsheet codecs

pub mod export;
pub mod import;
pub mod queue;
pub mod sheet;
pub mod task;

#[cfg(test)]
mod test;

pub use queue::JobQueue;
pub use task::{ExportHeader, JobTask};

use sea_orm::DatabaseConnection;

use crate::server::storage::Storage;

/// Resources a running job needs.
#[derive(Clone)]
pub struct JobContext {
    pub db: DatabaseConnection,
    pub storage: Storage,
    /// Base URL used when rendering links into exports.
    pub app_url: String,
}
