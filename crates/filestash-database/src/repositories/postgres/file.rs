//! PostgreSQL file repository.

use async_trait::async_trait;
use uuid::Uuid;

use filestash_core::error::{AppError, ErrorKind};
use filestash_core::result::AppResult;
use filestash_core::types::{FileId, PageRequest, ParentRef, UserId};
use filestash_entity::file::{CreateFileRecord, FileRecord};

use super::sql_bound;
use crate::connection::DatabasePool;
use crate::repositories::FileRepository;

/// File records stored in the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    db: DatabasePool,
}

impl PgFileRepository {
    pub fn new(db: DatabasePool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn insert(&self, data: CreateFileRecord) -> AppResult<FileRecord> {
        sqlx::query_as::<_, FileRecord>(
            "INSERT INTO files (id, user_id, name, file_type, is_public, parent_id, local_path) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(data.id)
        .bind(data.user_id)
        .bind(&data.name)
        .bind(data.file_type)
        .bind(data.is_public)
        .bind(data.parent.folder_id())
        .bind(&data.local_path)
        .fetch_one(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_by_parent(
        &self,
        owner: UserId,
        parent: ParentRef,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE user_id = $1 AND parent_id IS NOT DISTINCT FROM $2 \
             ORDER BY seq ASC LIMIT $3 OFFSET $4",
        )
        .bind(owner)
        .bind(parent.folder_id())
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_by_owner(
        &self,
        owner: UserId,
        page: &PageRequest,
    ) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "SELECT * FROM files WHERE user_id = $1 ORDER BY seq ASC LIMIT $2 OFFSET $3",
        )
        .bind(owner)
        .bind(sql_bound(page.limit()))
        .bind(sql_bound(page.offset()))
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list user files", e))
    }

    async fn set_public(
        &self,
        id: FileId,
        owner: UserId,
        is_public: bool,
    ) -> AppResult<Option<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "UPDATE files SET is_public = $3 WHERE id = $1 AND user_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(is_public)
        .fetch_optional(self.db.pool())
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update file visibility", e)
        })
    }

    async fn find_subtree(&self, root: FileId) -> AppResult<Vec<FileRecord>> {
        sqlx::query_as::<_, FileRecord>(
            "WITH RECURSIVE tree AS ( \
                 SELECT f.*, 0 AS depth FROM files f WHERE f.id = $1 \
                 UNION ALL \
                 SELECT c.*, t.depth + 1 FROM files c INNER JOIN tree t ON c.parent_id = t.id \
             ) \
             SELECT id, user_id, name, file_type, is_public, parent_id, local_path, seq, created_at \
             FROM tree ORDER BY depth ASC, seq ASC",
        )
        .bind(root)
        .fetch_all(self.db.pool())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to collect subtree", e))
    }

    async fn delete_many(&self, ids: &[FileId]) -> AppResult<u64> {
        let ids: Vec<Uuid> = ids.iter().map(|id| id.into_uuid()).collect();
        let result = sqlx::query("DELETE FROM files WHERE id = ANY($1)")
            .bind(ids)
            .execute(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> AppResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(self.db.pool())
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
        Ok(u64::try_from(total).unwrap_or_default())
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.db.health_check().await
    }
}
