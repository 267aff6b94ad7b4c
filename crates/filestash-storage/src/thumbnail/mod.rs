//! Image thumbnail generation.

pub mod generator;

pub use generator::ThumbnailGenerator;
