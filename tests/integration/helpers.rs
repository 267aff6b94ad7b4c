//! Shared test helpers for integration tests.
#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::{Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::watch;
use tower::ServiceExt;

use filestash_core::config::{AppConfig, CacheBackend, DatabaseBackend};

/// Test application context
pub struct TestApp {
    /// The Axum app for making test requests
    pub router: Router,
    /// Application config
    pub config: AppConfig,
    _blobs: TempDir,
    _shutdown: watch::Sender<bool>,
}

impl TestApp {
    /// Create a new test application on in-memory backends with a running
    /// thumbnail worker.
    pub async fn new() -> Self {
        let blobs = tempfile::tempdir().expect("Failed to create blob dir");

        let mut config = AppConfig::default();
        config.database.backend = DatabaseBackend::Memory;
        config.cache.provider = CacheBackend::Memory;
        config.storage.folder_path = blobs.path().to_string_lossy().into_owned();
        config.worker.enabled = true;

        let (state, worker) = filestash_api::build_state(config.clone())
            .await
            .expect("Failed to build state");

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        if let Some(runner) = worker {
            tokio::spawn(runner.run(shutdown_rx));
        }

        Self {
            router: filestash_api::build_app(state),
            config,
            _blobs: blobs,
            _shutdown: shutdown_tx,
        }
    }

    /// Register a user and return their id.
    pub async fn create_user(&self, email: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/users",
                Some(serde_json::json!({ "email": email, "password": password })),
                None,
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "User creation failed: {:?}",
            response.body
        );
        response.body["id"]
            .as_str()
            .expect("No id in user response")
            .to_string()
    }

    /// Connect with Basic credentials and return the raw response.
    pub async fn connect_raw(&self, email: &str, password: &str) -> TestResponse {
        let credentials = STANDARD.encode(format!("{email}:{password}"));
        self.send(
            Request::builder()
                .method("GET")
                .uri("/connect")
                .header(header::AUTHORIZATION, format!("Basic {credentials}"))
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    /// Connect and return the session token.
    pub async fn connect(&self, email: &str, password: &str) -> String {
        let response = self.connect_raw(email, password).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Connect failed: {:?}",
            response.body
        );
        response.body["token"]
            .as_str()
            .expect("No token in connect response")
            .to_string()
    }

    /// Register a user and connect as them.
    pub async fn signed_in(&self, email: &str) -> String {
        self.create_user(email, "toto1234!").await;
        self.connect(email, "toto1234!").await
    }

    /// Create an item and return its JSON rendering.
    pub async fn create_file(&self, token: &str, body: Value) -> Value {
        let response = self.request("POST", "/files", Some(body), Some(token)).await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "File creation failed: {:?}",
            response.body
        );
        response.body
    }

    /// Create a folder and return its id.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let mut body = serde_json::json!({ "name": name, "type": "folder" });
        if let Some(parent_id) = parent_id {
            body["parentId"] = Value::from(parent_id);
        }
        self.create_file(token, body).await["id"]
            .as_str()
            .expect("No id in file response")
            .to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header("X-Token", token);
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body")
            .to_vec();

        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            body,
            bytes,
            content_type,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body, `Null` when the body is not JSON
    pub body: Value,
    /// Raw body
    pub bytes: Vec<u8>,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
}

/// Base64 as the API expects it in `data`.
pub fn encode(data: &[u8]) -> String {
    STANDARD.encode(data)
}
