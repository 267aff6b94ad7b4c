//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use filestash_auth::{PasswordHasher, SessionManager};
use filestash_cache::CacheManager;
use filestash_core::config::AppConfig;
use filestash_core::error::AppError;
use filestash_core::traits::storage::StorageProvider;
use filestash_database::Repositories;
use filestash_service::{DownloadService, FileService, SystemService, UserService};
use filestash_storage::{LocalStorageProvider, ThumbnailGenerator};
use filestash_worker::{JobQueue, ThumbnailJobHandler, WorkerRunner};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Construct every backend and service from configuration.
///
/// Returns the handler state plus the thumbnail worker when the worker
/// is enabled. The caller decides where the worker runs.
pub async fn build_state(config: AppConfig) -> Result<(AppState, Option<WorkerRunner>), AppError> {
    // ── Step 1: Cache ────────────────────────────────────────────
    info!(provider = ?config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    // ── Step 2: Metadata store ───────────────────────────────────
    info!(backend = ?config.database.backend, "Initializing metadata store");
    let repos = Repositories::from_config(&config.database).await?;

    // ── Step 3: Blob storage ─────────────────────────────────────
    let storage: Arc<dyn StorageProvider> =
        Arc::new(LocalStorageProvider::new(&config.storage.folder_path).await?);
    let thumbnails = ThumbnailGenerator::new(
        Arc::clone(&storage),
        config.storage.thumbnail_sizes.clone(),
    );

    // ── Step 4: Job queue & worker ───────────────────────────────
    let (jobs, worker) = if config.worker.enabled {
        let (queue, receiver) = JobQueue::bounded(config.worker.queue_capacity);
        let handler = Arc::new(ThumbnailJobHandler::new(
            Arc::clone(&repos.files),
            thumbnails.clone(),
        ));
        let runner = WorkerRunner::new(receiver, handler, &config.worker);
        (Some(queue), Some(runner))
    } else {
        warn!("Worker disabled; images will not get thumbnails");
        (None, None)
    };

    // ── Step 5: Auth ─────────────────────────────────────────────
    let password_hasher = PasswordHasher::new();
    let session_manager = Arc::new(SessionManager::new(
        cache.clone(),
        Arc::clone(&repos.users),
        password_hasher.clone(),
        &config.auth,
    ));

    // ── Step 6: Services ─────────────────────────────────────────
    let file_service = Arc::new(FileService::new(
        Arc::clone(&repos.files),
        Arc::clone(&storage),
        thumbnails.clone(),
        jobs,
    ));
    let download_service = Arc::new(DownloadService::new(
        Arc::clone(&repos.files),
        Arc::clone(&storage),
        thumbnails,
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&repos.users),
        password_hasher,
    ));
    let system_service = Arc::new(SystemService::new(
        cache.clone(),
        Arc::clone(&repos.files),
        Arc::clone(&repos.users),
    ));

    let state = AppState {
        config: Arc::new(config),
        cache,
        session_manager,
        file_service,
        download_service,
        user_service,
        system_service,
    };

    Ok((state, worker))
}

/// Runs the FileStash server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting FileStash server...");

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let (state, worker) = build_state(config).await?;

    // ── Shutdown channel & worker ────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker_handle = worker.map(|runner| tokio::spawn(runner.run(shutdown_rx)));

    // ── HTTP server ──────────────────────────────────────────────
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!(%addr, "FileStash server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = worker_handle {
        if tokio::time::timeout(grace, handle).await.is_err() {
            warn!("Worker did not stop within the shutdown grace period");
        }
    }

    info!("FileStash server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
