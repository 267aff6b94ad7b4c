//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod file;
pub mod health;
pub mod user;
