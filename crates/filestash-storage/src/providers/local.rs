//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use filestash_core::error::{AppError, ErrorKind};
use filestash_core::result::AppResult;
use filestash_core::traits::storage::StorageProvider;

/// Local filesystem storage provider.
///
/// Blobs live directly under the root, named by a random UUID. Paths
/// handed back to callers are absolute.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at the given directory, creating it if needed.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        fs::create_dir_all(root_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {root_path}"),
                e,
            )
        })?;
        let root = fs::canonicalize(root_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to resolve storage root: {root_path}"),
                e,
            )
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a path to a location inside the root.
    ///
    /// Absolute paths must already point inside the root; relative paths
    /// are joined onto it. Parent-directory components are rejected.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let candidate = Path::new(path);
        if candidate
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return Err(AppError::storage(format!("Path escapes storage root: {path}")));
        }

        let full = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        if full.starts_with(&self.root) {
            Ok(full)
        } else {
            Err(AppError::storage(format!("Path escapes storage root: {path}")))
        }
    }

    fn path_string(path: &Path) -> AppResult<String> {
        path.to_str()
            .map(str::to_string)
            .ok_or_else(|| AppError::storage("Storage path is not valid UTF-8"))
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false))
    }

    async fn store(&self, data: Bytes) -> AppResult<String> {
        let full_path = self.root.join(Uuid::new_v4().to_string());
        let path = Self::path_string(&full_path)?;
        self.write(&path, data).await?;
        Ok(path)
    }

    async fn write(&self, path: &str, data: Bytes) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        // Readers never observe a partially written blob.
        let staging = full_path.with_extension(format!("part-{}", Uuid::new_v4().simple()));
        let written = match fs::write(&staging, &data).await {
            Ok(()) => fs::rename(&staging, &full_path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&staging).await;
            return Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {path}"),
                e,
            ));
        }

        debug!(path, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn read_bytes(&self, path: &str) -> AppResult<Option<Bytes>> {
        let full_path = self.resolve(path)?;
        match fs::read(&full_path).await {
            Ok(data) => Ok(Some(Bytes::from(data))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read file: {path}"),
                e,
            )),
        }
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted file");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {path}"),
                e,
            )),
        }
    }

    async fn exists(&self, path: &str) -> AppResult<bool> {
        let full_path = self.resolve(path)?;
        fs::try_exists(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to check file: {path}"),
                e,
            )
        })
    }
}
