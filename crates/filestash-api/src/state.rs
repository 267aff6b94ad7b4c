//! Application state shared across all handlers and extractors.

use std::sync::Arc;

use filestash_auth::SessionManager;
use filestash_cache::CacheManager;
use filestash_core::config::AppConfig;
use filestash_service::{DownloadService, FileService, SystemService, UserService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// Cache manager (Redis or in-memory)
    pub cache: Arc<CacheManager>,

    // ── Auth ─────────────────────────────────────────────────
    /// Session token issuer and resolver
    pub session_manager: Arc<SessionManager>,

    // ── Services ─────────────────────────────────────────────
    /// File, image, and folder records
    pub file_service: Arc<FileService>,
    /// Content retrieval
    pub download_service: Arc<DownloadService>,
    /// Registration and profile
    pub user_service: Arc<UserService>,
    /// Health and counts
    pub system_service: Arc<SystemService>,
}
