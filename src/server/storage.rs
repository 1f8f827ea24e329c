//! Local file storage split into a private and a public disk.
//!
//! Exported spreadsheets and uploaded import files live on the private disk and are
//! only reachable through the download endpoint. Payment receipts live on the public
//! disk, which the router serves under `/storage`.

use std::path::{Component, Path, PathBuf};

use crate::server::error::storage::StorageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disk {
    Private,
    Public,
}

impl Disk {
    fn directory(self) -> &'static str {
        match self {
            Self::Private => "app/private",
            Self::Public => "app/public",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of a disk.
    pub fn disk_root(&self, disk: Disk) -> PathBuf {
        self.root.join(disk.directory())
    }

    /// Creates both disk directories.
    pub async fn prepare(&self) -> Result<(), StorageError> {
        for disk in [Disk::Private, Disk::Public] {
            let dir = self.disk_root(disk);
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| StorageError::Io { path: dir, source })?;
        }
        Ok(())
    }

    /// Resolves a disk-relative path to an absolute one.
    ///
    /// # Returns
    /// - `Ok(PathBuf)` - Path inside the disk root
    /// - `Err(StorageError::InvalidPath)` - Path is empty, absolute, or contains `..`
    pub fn path(&self, disk: Disk, relative: &str) -> Result<PathBuf, StorageError> {
        let candidate = Path::new(relative);
        let is_safe = !relative.is_empty()
            && candidate
                .components()
                .all(|component| matches!(component, Component::Normal(_)));

        if !is_safe {
            return Err(StorageError::InvalidPath(relative.to_string()));
        }

        Ok(self.disk_root(disk).join(candidate))
    }

    /// Writes `bytes` to `relative`, creating parent directories.
    pub async fn put(&self, disk: Disk, relative: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path(disk, relative)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StorageError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Io { path, source })
    }

    pub async fn exists(&self, disk: Disk, relative: &str) -> bool {
        match self.path(disk, relative) {
            Ok(path) => tokio::fs::try_exists(path).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    /// Removes a file.
    ///
    /// # Returns
    /// - `Ok(true)` - File was deleted
    /// - `Ok(false)` - File did not exist
    /// - `Err(StorageError)` - Invalid path or I/O failure
    pub async fn delete(&self, disk: Disk, relative: &str) -> Result<bool, StorageError> {
        let path = self.path(disk, relative)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}
