use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use filestash_core::error::AppError;
use filestash_core::traits::cache::CacheProvider;
use filestash_database::repositories::{FileRepository, UserRepository};

/// Reachability of the backing services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    pub cache: bool,
    pub database: bool,
}

/// Record counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStats {
    pub users: u64,
    pub files: u64,
}

/// Reports health and totals; needs no caller.
#[derive(Debug, Clone)]
pub struct SystemService {
    cache: Arc<dyn CacheProvider>,
    files: Arc<dyn FileRepository>,
    users: Arc<dyn UserRepository>,
}

impl SystemService {
    pub fn new(
        cache: Arc<dyn CacheProvider>,
        files: Arc<dyn FileRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            cache,
            files,
            users,
        }
    }

    /// Probe the cache and the metadata store. A failing probe reads as down.
    pub async fn status(&self) -> SystemStatus {
        let (cache, database) = tokio::join!(self.cache.health_check(), self.files.health_check());
        SystemStatus {
            cache: cache.unwrap_or_else(|e| {
                warn!(error = %e, "Cache health check failed");
                false
            }),
            database: database.unwrap_or_else(|e| {
                warn!(error = %e, "Database health check failed");
                false
            }),
        }
    }

    pub async fn stats(&self) -> Result<SystemStats, AppError> {
        Ok(SystemStats {
            users: self.users.count().await?,
            files: self.files.count().await?,
        })
    }
}
