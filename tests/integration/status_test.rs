//! Integration tests for status and stats.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::TestApp;

#[tokio::test]
async fn test_status_reports_backends() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/status", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "redis": true, "db": true }));
}

#[tokio::test]
async fn test_stats_counts_users_and_files() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/stats", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "users": 0, "files": 0 }));

    let bob = app.signed_in("bob@dylan.com").await;
    app.signed_in("eve@example.com").await;
    let folder = app.create_folder(&bob, "a", None).await;
    app.create_folder(&bob, "b", Some(&folder)).await;
    app.create_folder(&bob, "c", None).await;

    let response = app.request("GET", "/stats", None, None).await;
    assert_eq!(response.body, json!({ "users": 2, "files": 3 }));

    app.request("DELETE", &format!("/files/{folder}"), None, Some(&bob))
        .await;
    let response = app.request("GET", "/stats", None, None).await;
    assert_eq!(response.body, json!({ "users": 2, "files": 1 }));
}
