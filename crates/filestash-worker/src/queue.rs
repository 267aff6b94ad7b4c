//! In-process job queue.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::debug;

use filestash_core::error::AppError;
use filestash_core::types::{FileId, UserId};

/// Request to build thumbnails for a freshly uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailJob {
    pub file_id: FileId,
    pub user_id: UserId,
    /// Blob location of the source image.
    pub local_path: String,
}

/// Producer side of the job queue.
#[derive(Debug, Clone)]
pub struct JobQueue {
    sender: mpsc::Sender<ThumbnailJob>,
}

impl JobQueue {
    /// Create a queue holding at most `capacity` pending jobs.
    ///
    /// The receiver is handed to a [`crate::runner::WorkerRunner`].
    pub fn bounded(capacity: usize) -> (Self, mpsc::Receiver<ThumbnailJob>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (Self { sender }, receiver)
    }

    /// Enqueue a job without waiting.
    ///
    /// Fails when the queue is full or no worker is attached.
    pub fn enqueue(&self, job: ThumbnailJob) -> Result<(), AppError> {
        let file_id = job.file_id;
        match self.sender.try_send(job) {
            Ok(()) => {
                debug!(file_id = %file_id, "Thumbnail job enqueued");
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(AppError::internal("Job queue is full")),
            Err(TrySendError::Closed(_)) => Err(AppError::internal("Job queue is closed")),
        }
    }
}
