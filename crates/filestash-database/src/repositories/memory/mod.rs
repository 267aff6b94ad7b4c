//! In-memory repositories.
//!
//! Each repository keeps its state behind a single `RwLock`, so every
//! operation observes and produces a consistent snapshot.

pub mod file;
pub mod user;

pub use file::MemoryFileRepository;
pub use user::MemoryUserRepository;
