use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Relative path is empty, absolute, or escapes the disk root.
    #[error("Invalid storage path: {0}")]
    InvalidPath(String),
}
