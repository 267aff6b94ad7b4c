//! # filestash-database
//!
//! Metadata store for FileStash: PostgreSQL connection management,
//! migrations, and the file and user repositories with both PostgreSQL
//! and in-memory implementations.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{FileRepository, Repositories, UserRepository};
