//! # filestash-service
//!
//! Business logic service layer for FileStash. Each service orchestrates
//! repositories, blob storage, and the job queue to implement one group
//! of use cases.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. Every operation receives the
//! caller explicitly as `Option<&RequestContext>`.

pub mod context;
pub mod file;
pub mod system;
pub mod user;

pub use context::RequestContext;
pub use file::{CreateFileRequest, DownloadResult, DownloadService, FileService};
pub use system::{SystemService, SystemStats, SystemStatus};
pub use user::{CreateUserRequest, UserService};
