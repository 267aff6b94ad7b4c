//! Storage provider trait for pluggable blob storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for blob storage backends.
///
/// Paths handed out by [`StorageProvider::store`] are opaque to callers
/// and are the only paths the other operations are expected to see,
/// plus derived paths such as thumbnail variants.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a new blob under a freshly generated name and return its path.
    async fn store(&self, data: Bytes) -> AppResult<String>;

    /// Write bytes to the given path, replacing any existing blob.
    async fn write(&self, path: &str, data: Bytes) -> AppResult<()>;

    /// Read a blob into memory. Returns `None` when it does not exist.
    async fn read_bytes(&self, path: &str) -> AppResult<Option<Bytes>>;

    /// Delete the blob at the given path. Deleting a missing blob succeeds.
    async fn delete(&self, path: &str) -> AppResult<()>;

    /// Check whether a blob exists at the given path.
    async fn exists(&self, path: &str) -> AppResult<bool>;
}
