//! # filestash-auth
//!
//! Authentication for FileStash.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing
//! - `credentials` — HTTP Basic credential parsing
//! - `session` — opaque session tokens kept in the cache

pub mod credentials;
pub mod password;
pub mod session;

pub use credentials::BasicCredentials;
pub use password::PasswordHasher;
pub use session::SessionManager;
