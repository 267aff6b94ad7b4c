//! Service health and record counts.

pub mod service;

pub use service::{SystemService, SystemStats, SystemStatus};
