//! Core file operations: create, read, list, publish, and delete.

use std::sync::Arc;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::{info, warn};

use filestash_core::error::{AppError, ErrorKind};
use filestash_core::traits::storage::StorageProvider;
use filestash_core::types::{FileId, PageRequest, ParentRef};
use filestash_database::repositories::FileRepository;
use filestash_entity::file::{CreateFileRecord, FileRecord, FileType};
use filestash_storage::ThumbnailGenerator;
use filestash_worker::{JobQueue, ThumbnailJob};

use super::parse_id;
use crate::context::RequestContext;

/// Fields of a create request as the client sent them.
///
/// Everything is optional here; [`FileService::create`] decides which
/// absences are errors.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateFileRequest {
    pub name: Option<String>,
    pub file_type: Option<String>,
    /// Textual parent reference; `None`, `""` and `"0"` mean the root.
    pub parent_id: Option<String>,
    pub is_public: Option<bool>,
    /// Base64-encoded content.
    pub data: Option<String>,
}

/// Handles the lifecycle of file, image, and folder records.
#[derive(Debug, Clone)]
pub struct FileService {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn StorageProvider>,
    thumbnails: ThumbnailGenerator,
    jobs: Option<JobQueue>,
}

impl FileService {
    /// Creates a new file service.
    ///
    /// Without a job queue, images are stored but never get thumbnails.
    pub fn new(
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        thumbnails: ThumbnailGenerator,
        jobs: Option<JobQueue>,
    ) -> Self {
        Self {
            files,
            storage,
            thumbnails,
            jobs,
        }
    }

    /// Create a folder, or store content and create a file or image.
    pub async fn create(
        &self,
        ctx: Option<&RequestContext>,
        req: CreateFileRequest,
    ) -> Result<FileRecord, AppError> {
        let ctx = RequestContext::require(ctx)?;

        let name = req
            .name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::from_kind(ErrorKind::MissingName))?;

        let file_type = req
            .file_type
            .as_deref()
            .ok_or_else(|| AppError::from_kind(ErrorKind::MissingType))?
            .parse::<FileType>()?;

        let data = req.data.filter(|data| !data.is_empty());
        if file_type.has_content() && data.is_none() {
            return Err(ErrorKind::MissingData.into());
        }

        let parent = self.resolve_parent(ctx, req.parent_id.as_deref()).await?;

        let local_path = match data {
            Some(encoded) if file_type.has_content() => {
                let bytes = STANDARD
                    .decode(encoded.trim())
                    .map_err(|_| AppError::validation("Invalid data"))?;
                Some(self.storage.store(Bytes::from(bytes)).await?)
            }
            _ => None,
        };

        let record = self
            .files
            .insert(CreateFileRecord {
                id: FileId::new(),
                user_id: ctx.user_id,
                name,
                file_type,
                is_public: req.is_public.unwrap_or(false),
                parent,
                local_path,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            file_id = %record.id,
            file_type = %record.file_type,
            "File created"
        );

        if record.file_type.is_image() {
            self.enqueue_thumbnails(&record);
        }

        Ok(record)
    }

    /// Fetch one of the caller's own records.
    pub async fn get_by_id(
        &self,
        ctx: Option<&RequestContext>,
        id: &str,
    ) -> Result<FileRecord, AppError> {
        let ctx = RequestContext::require(ctx)?;
        let id = parse_id(id, || AppError::from_kind(ErrorKind::InvalidId))?;

        self.files
            .find_by_id(id)
            .await?
            .filter(|record| record.is_owned_by(ctx.user_id))
            .ok_or_else(AppError::not_found)
    }

    /// One page of the caller's items under a parent.
    ///
    /// A parent that matches nothing, malformed ids included, yields an
    /// empty page.
    pub async fn list_by_parent(
        &self,
        ctx: Option<&RequestContext>,
        parent_id: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<FileRecord>, AppError> {
        let ctx = RequestContext::require(ctx)?;
        let parent = match parent_id.map(ParentRef::parse).transpose() {
            Ok(parent) => parent.unwrap_or_default(),
            Err(_) => return Ok(Vec::new()),
        };

        self.files
            .find_by_parent(ctx.user_id, parent, &page)
            .await
    }

    /// One page of every item the caller owns.
    pub async fn list_mine(
        &self,
        ctx: Option<&RequestContext>,
        page: PageRequest,
    ) -> Result<Vec<FileRecord>, AppError> {
        let ctx = RequestContext::require(ctx)?;
        self.files.find_by_owner(ctx.user_id, &page).await
    }

    /// Publish or unpublish one of the caller's records.
    pub async fn set_visibility(
        &self,
        ctx: Option<&RequestContext>,
        id: &str,
        is_public: bool,
    ) -> Result<FileRecord, AppError> {
        let ctx = RequestContext::require(ctx)?;
        let id = parse_id(id, AppError::not_found)?;

        let record = self
            .files
            .set_public(id, ctx.user_id, is_public)
            .await?
            .ok_or_else(AppError::not_found)?;

        info!(user_id = %ctx.user_id, file_id = %id, is_public, "File visibility changed");
        Ok(record)
    }

    /// Delete a record, its blob, and for folders the whole subtree.
    ///
    /// Blobs go first; the records are removed in one step afterwards.
    /// Re-running after a partial failure completes the removal. Image
    /// thumbnails are swept once more after the records are gone, since a
    /// running thumbnail job may have written them in between.
    pub async fn delete(&self, ctx: Option<&RequestContext>, id: &str) -> Result<(), AppError> {
        let ctx = RequestContext::require(ctx)?;
        let id = parse_id(id, AppError::not_found)?;

        let record = self
            .files
            .find_by_id(id)
            .await?
            .ok_or_else(AppError::not_found)?;
        if !record.is_owned_by(ctx.user_id) {
            return Err(AppError::permission_denied());
        }

        let doomed = if record.file_type.is_folder() {
            self.files.find_subtree(record.id).await?
        } else {
            vec![record]
        };

        for item in &doomed {
            self.remove_blobs(item).await?;
        }

        let ids: Vec<FileId> = doomed.iter().map(|item| item.id).collect();
        let removed = self.files.delete_many(&ids).await?;

        for item in doomed.iter().filter(|item| item.file_type.is_image()) {
            if let Some(local_path) = item.local_path.as_deref() {
                self.thumbnails.delete_thumbnails(local_path).await?;
            }
        }

        info!(user_id = %ctx.user_id, file_id = %id, removed, "File deleted");
        Ok(())
    }

    /// Resolve the requested parent to the caller's own folder or the root.
    async fn resolve_parent(
        &self,
        ctx: &RequestContext,
        raw: Option<&str>,
    ) -> Result<ParentRef, AppError> {
        let parent = match raw {
            None => ParentRef::Root,
            Some(raw) => ParentRef::parse(raw)
                .map_err(|_| AppError::from_kind(ErrorKind::ParentNotFound))?,
        };

        let Some(folder_id) = parent.folder_id() else {
            return Ok(parent);
        };

        match self.files.find_by_id(folder_id).await? {
            Some(folder) if folder.file_type.is_folder() && folder.is_owned_by(ctx.user_id) => {
                Ok(parent)
            }
            _ => Err(ErrorKind::ParentNotFound.into()),
        }
    }

    async fn remove_blobs(&self, item: &FileRecord) -> Result<(), AppError> {
        let Some(local_path) = item.local_path.as_deref() else {
            return Ok(());
        };
        if item.file_type.is_image() {
            self.thumbnails.delete_thumbnails(local_path).await?;
        }
        self.storage.delete(local_path).await
    }

    fn enqueue_thumbnails(&self, record: &FileRecord) {
        let (Some(jobs), Some(local_path)) = (&self.jobs, &record.local_path) else {
            return;
        };
        let job = ThumbnailJob {
            file_id: record.id,
            user_id: record.user_id,
            local_path: local_path.clone(),
        };
        if let Err(e) = jobs.enqueue(job) {
            warn!(file_id = %record.id, error = %e, "Failed to enqueue thumbnail job");
        }
    }
}
