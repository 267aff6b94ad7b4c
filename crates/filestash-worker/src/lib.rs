//! Background job processing for FileStash.
//!
//! This crate provides:
//! - An in-process job queue fed by the request path
//! - A worker runner that drains the queue with bounded concurrency
//! - The thumbnail job handler

pub mod jobs;
pub mod queue;
pub mod runner;

pub use jobs::{JobExecutionError, ThumbnailJobHandler};
pub use queue::{JobQueue, ThumbnailJob};
pub use runner::WorkerRunner;
