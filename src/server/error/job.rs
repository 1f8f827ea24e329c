use thiserror::Error;

use crate::server::error::storage::StorageError;

/// Errors raised while running a background export or import.
#[derive(Error, Debug)]
pub enum JobError {
    /// The job record the task belongs to does not exist.
    ///
    /// Fatal: never retried and the job table is left untouched.
    #[error("Job record {0} not found")]
    RecordNotFound(i32),

    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Reading or writing a spreadsheet failed.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// The worker channel is closed; the record stays pending for the sweep.
    #[error("Job queue is closed")]
    QueueClosed,

    /// The routine panicked; the record is marked failed and the job is not retried.
    #[error("Job panicked: {0}")]
    Panicked(String),

    /// The persisted payload could not be encoded or decoded.
    #[error("Invalid job payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}

impl JobError {
    /// Whether another attempt may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Self::RecordNotFound(_) | Self::Panicked(_))
    }
}

impl From<rust_xlsxwriter::XlsxError> for JobError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        Self::Spreadsheet(err.to_string())
    }
}

impl From<calamine::Error> for JobError {
    fn from(err: calamine::Error) -> Self {
        Self::Spreadsheet(err.to_string())
    }
}

impl From<csv::Error> for JobError {
    fn from(err: csv::Error) -> Self {
        Self::Spreadsheet(err.to_string())
    }
}
