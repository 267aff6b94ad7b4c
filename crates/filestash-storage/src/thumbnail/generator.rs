//! Thumbnail generator for image items.

use std::io::Cursor;
use std::sync::Arc;

use bytes::Bytes;
use image::imageops::FilterType;
use tracing::debug;

use filestash_core::error::{AppError, ErrorKind};
use filestash_core::result::AppResult;
use filestash_core::traits::storage::StorageProvider;

/// Writes width-bounded variants of an image next to the original blob.
///
/// The variant for width `N` of a blob at `P` lives at `P_N` and keeps
/// the source encoding and aspect ratio.
#[derive(Debug, Clone)]
pub struct ThumbnailGenerator {
    provider: Arc<dyn StorageProvider>,
    sizes: Vec<u32>,
}

impl ThumbnailGenerator {
    pub fn new(provider: Arc<dyn StorageProvider>, sizes: Vec<u32>) -> Self {
        Self { provider, sizes }
    }

    /// Where the thumbnail of the given width is stored.
    pub fn thumbnail_path(local_path: &str, size: u32) -> String {
        format!("{local_path}_{size}")
    }

    pub fn is_supported_size(&self, size: u32) -> bool {
        self.sizes.contains(&size)
    }

    /// Generate every configured thumbnail for the blob at `source_path`.
    ///
    /// Returns the paths written.
    pub async fn generate(&self, source_path: &str) -> AppResult<Vec<String>> {
        let source_bytes = self
            .provider
            .read_bytes(source_path)
            .await?
            .ok_or_else(|| AppError::storage(format!("Source blob missing: {source_path}")))?;

        let sizes = self.sizes.clone();
        let rendered = tokio::task::spawn_blocking(move || Self::render_all(&source_bytes, &sizes))
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Thumbnail task panicked", e))??;

        let mut paths = Vec::with_capacity(rendered.len());
        for (size, data) in rendered {
            let path = Self::thumbnail_path(source_path, size);
            self.provider.write(&path, data).await?;
            debug!(source = source_path, size, output = %path, "Generated thumbnail");
            paths.push(path);
        }
        Ok(paths)
    }

    /// Remove every thumbnail of the blob at `local_path`. Missing ones are ignored.
    pub async fn delete_thumbnails(&self, local_path: &str) -> AppResult<()> {
        for &size in &self.sizes {
            self.provider
                .delete(&Self::thumbnail_path(local_path, size))
                .await?;
        }
        Ok(())
    }

    /// Decode once and encode one variant per width.
    fn render_all(data: &[u8], sizes: &[u32]) -> AppResult<Vec<(u32, Bytes)>> {
        let format = image::guess_format(data).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Unrecognized image format", e)
        })?;
        let source = image::load_from_memory_with_format(data, format)
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to decode image", e))?;

        sizes
            .iter()
            .map(|&size| {
                let resized = source.resize(size, u32::MAX, FilterType::Triangle);
                let mut out = Cursor::new(Vec::new());
                resized.write_to(&mut out, format).map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Failed to encode thumbnail", e)
                })?;
                Ok((size, Bytes::from(out.into_inner())))
            })
            .collect()
    }
}
