//! Content retrieval for files and image thumbnails.

use std::sync::Arc;

use bytes::Bytes;
use tracing::debug;

use filestash_core::error::{AppError, ErrorKind};
use filestash_core::traits::storage::StorageProvider;
use filestash_database::repositories::FileRepository;
use filestash_storage::ThumbnailGenerator;
use filestash_storage::mime::content_type_for;

use super::parse_id;
use crate::context::RequestContext;

/// Raw content ready to be written to a response.
#[derive(Debug, Clone)]
pub struct DownloadResult {
    pub data: Bytes,
    pub content_type: String,
}

/// Serves stored bytes subject to visibility rules.
#[derive(Debug, Clone)]
pub struct DownloadService {
    files: Arc<dyn FileRepository>,
    storage: Arc<dyn StorageProvider>,
    thumbnails: ThumbnailGenerator,
}

impl DownloadService {
    pub fn new(
        files: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        thumbnails: ThumbnailGenerator,
    ) -> Self {
        Self {
            files,
            storage,
            thumbnails,
        }
    }

    /// Read the content of a record, or one of its thumbnails when `size`
    /// is given.
    ///
    /// Private records look missing to everyone except their owner.
    pub async fn get_data(
        &self,
        ctx: Option<&RequestContext>,
        id: &str,
        size: Option<&str>,
    ) -> Result<DownloadResult, AppError> {
        let id = parse_id(id, AppError::not_found)?;
        let record = self
            .files
            .find_by_id(id)
            .await?
            .filter(|record| record.is_readable_by(ctx.map(|c| c.user_id)))
            .ok_or_else(AppError::not_found)?;

        if record.file_type.is_folder() {
            return Err(ErrorKind::NoContent.into());
        }

        let local_path = record.local_path.as_deref().ok_or_else(AppError::not_found)?;
        let path = match size {
            None => local_path.to_string(),
            Some(raw) => {
                let size = raw
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|size| self.thumbnails.is_supported_size(*size))
                    .ok_or_else(AppError::not_found)?;
                ThumbnailGenerator::thumbnail_path(local_path, size)
            }
        };

        let data = self
            .storage
            .read_bytes(&path)
            .await?
            .ok_or_else(AppError::not_found)?;

        debug!(file_id = %record.id, bytes = data.len(), "Serving content");

        Ok(DownloadResult {
            data,
            content_type: content_type_for(&record.name),
        })
    }
}
