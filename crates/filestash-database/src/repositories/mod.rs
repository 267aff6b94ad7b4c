//! Repository traits and their PostgreSQL and in-memory implementations.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use filestash_core::config::{DatabaseBackend, DatabaseConfig};
use filestash_core::result::AppResult;
use filestash_core::types::{FileId, PageRequest, ParentRef, UserId};
use filestash_entity::file::{CreateFileRecord, FileRecord};
use filestash_entity::user::{CreateUser, User};

use crate::connection::DatabasePool;
use crate::migration::run_migrations;

pub use memory::{MemoryFileRepository, MemoryUserRepository};
pub use postgres::{PgFileRepository, PgUserRepository};

/// Persistence for file, image, and folder records.
///
/// Listing methods return items in creation order.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new record and return it with its assigned sequence.
    async fn insert(&self, data: CreateFileRecord) -> AppResult<FileRecord>;

    /// Find a record by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileRecord>>;

    /// One page of the owner's items directly under `parent`.
    async fn find_by_parent(
        &self,
        owner: UserId,
        parent: ParentRef,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>>;

    /// One page of every item the owner has, regardless of parent.
    async fn find_by_owner(&self, owner: UserId, page: &PageRequest)
    -> AppResult<Vec<FileRecord>>;

    /// Set the visibility flag on an item the owner holds.
    ///
    /// Returns `None` when no such item belongs to `owner`.
    async fn set_public(
        &self,
        id: FileId,
        owner: UserId,
        is_public: bool,
    ) -> AppResult<Option<FileRecord>>;

    /// The item and all of its descendants, parents before children.
    async fn find_subtree(&self, root: FileId) -> AppResult<Vec<FileRecord>>;

    /// Remove the given records in a single atomic step.
    async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64>;

    /// Total number of records.
    async fn count(&self) -> AppResult<u64>;

    /// Whether the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}

/// Persistence for registered users.
#[async_trait]
pub trait UserRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a user. Fails with a conflict when the email is taken.
    async fn create(&self, data: CreateUser) -> AppResult<User>;

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Total number of users.
    async fn count(&self) -> AppResult<u64>;
}

/// The repository pair the rest of the application runs against.
#[derive(Debug, Clone)]
pub struct Repositories {
    pub files: Arc<dyn FileRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    /// Build the repositories selected in configuration.
    ///
    /// The PostgreSQL backend connects eagerly and applies migrations when
    /// configured to.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let db = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(db.pool()).await?;
                }
                Ok(Self {
                    files: Arc::new(PgFileRepository::new(db.clone())),
                    users: Arc::new(PgUserRepository::new(db.pool().clone())),
                })
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory metadata store");
                Ok(Self::in_memory())
            }
        }
    }

    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            files: Arc::new(MemoryFileRepository::new()),
            users: Arc::new(MemoryUserRepository::new()),
        }
    }
}
