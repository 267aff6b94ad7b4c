//! # filestash-storage
//!
//! Blob storage for FileStash: the local filesystem provider, content
//! type inference, and image thumbnail generation.

pub mod mime;
pub mod providers;
pub mod thumbnail;

pub use providers::local::LocalStorageProvider;
pub use thumbnail::ThumbnailGenerator;
