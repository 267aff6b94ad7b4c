//! # filestash-core
//!
//! Core crate for FileStash. Contains traits, configuration schemas,
//! typed identifiers, pagination types, the root-parent reference,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other FileStash crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
