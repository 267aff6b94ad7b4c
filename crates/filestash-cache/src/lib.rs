//! # filestash-cache
//!
//! Cache provider implementations for FileStash. Two modes:
//!
//! - **memory**: In-process cache using [moka](https://crates.io/crates/moka)
//!   with a TTL per entry
//! - **redis**: Redis-backed cache, compiled with the `redis-backend` feature
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::CacheManager;
