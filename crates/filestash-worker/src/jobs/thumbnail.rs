//! Thumbnail job handler.

use std::sync::Arc;

use tracing::{info, warn};

use filestash_database::repositories::FileRepository;
use filestash_entity::file::FileRecord;
use filestash_storage::ThumbnailGenerator;

use super::JobExecutionError;
use crate::queue::ThumbnailJob;

/// Builds the thumbnails for one uploaded image.
#[derive(Debug, Clone)]
pub struct ThumbnailJobHandler {
    files: Arc<dyn FileRepository>,
    generator: ThumbnailGenerator,
}

impl ThumbnailJobHandler {
    pub fn new(files: Arc<dyn FileRepository>, generator: ThumbnailGenerator) -> Self {
        Self { files, generator }
    }

    /// Run the job and return the written thumbnail paths.
    ///
    /// The job is dropped when the image no longer exists or belongs to
    /// someone else. An image deleted while its thumbnails were being
    /// written has them removed again.
    pub async fn execute(&self, job: &ThumbnailJob) -> Result<Vec<String>, JobExecutionError> {
        if job.local_path.is_empty() {
            return Err(JobExecutionError::Permanent("Missing localPath".to_string()));
        }

        let record = self
            .find_owned(job)
            .await?
            .ok_or_else(|| JobExecutionError::Permanent("File not found".to_string()))?;

        let paths = self.generator.generate(&job.local_path).await?;

        if self.find_owned(job).await?.is_none() {
            warn!(file_id = %job.file_id, "Image deleted during thumbnail generation");
            self.generator.delete_thumbnails(&job.local_path).await?;
            return Err(JobExecutionError::Permanent(
                "File deleted during generation".to_string(),
            ));
        }

        info!(
            file_id = %record.id,
            user_id = %record.user_id,
            count = paths.len(),
            "Thumbnails generated"
        );
        Ok(paths)
    }

    async fn find_owned(&self, job: &ThumbnailJob) -> Result<Option<FileRecord>, JobExecutionError> {
        Ok(self
            .files
            .find_by_id(job.file_id)
            .await?
            .filter(|record| record.is_owned_by(job.user_id)))
    }
}
