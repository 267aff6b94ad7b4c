//! Job handler implementations.

pub mod thumbnail;

pub use thumbnail::ThumbnailJobHandler;

use filestash_core::error::AppError;

/// Error from job execution.
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// The job can never succeed; it is dropped.
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Storage or metadata failure while running the job.
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}
