//! File, image, and folder use cases.

pub mod download;
pub mod service;

pub use download::{DownloadResult, DownloadService};
pub use service::{CreateFileRequest, FileService};

use filestash_core::error::AppError;
use filestash_core::types::FileId;

/// Parse a path id, reporting malformed ids as the given error.
pub(crate) fn parse_id(raw: &str, on_invalid: fn() -> AppError) -> Result<FileId, AppError> {
    raw.trim().parse::<FileId>().map_err(|_| on_invalid())
}
