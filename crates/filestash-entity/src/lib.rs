//! # filestash-entity
//!
//! Domain entity models for FileStash. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`; the in-memory repositories store the
//! same structs.

pub mod file;
pub mod user;
