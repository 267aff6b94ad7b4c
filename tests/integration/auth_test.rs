//! Integration tests for registration and the session flow.

mod helpers;

use http::StatusCode;

#[tokio::test]
async fn test_create_user_returns_id_and_email() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({ "email": "bob@dylan.com", "password": "toto1234!" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "bob@dylan.com");
    assert!(response.body["id"].is_string());
    assert!(response.body.get("password").is_none());
    assert!(response.body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_create_user_validation() {
    let app = helpers::TestApp::new().await;

    let cases = [
        (serde_json::json!({ "password": "x" }), "Missing email"),
        (serde_json::json!({ "email": "a@b.c" }), "Missing password"),
        (serde_json::json!({ "email": 42, "password": "x" }), "Missing email"),
    ];
    for (body, message) in cases {
        let response = app.request("POST", "/users", Some(body), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body, serde_json::json!({ "error": message }));
    }

    let response = app.request("POST", "/users", None, None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, serde_json::json!({ "error": "Missing email" }));

    app.create_user("bob@dylan.com", "toto1234!").await;
    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({ "email": "bob@dylan.com", "password": "other" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Already exist");
}

#[tokio::test]
async fn test_connect_and_me() {
    let app = helpers::TestApp::new().await;
    let user_id = app.create_user("bob@dylan.com", "toto1234!").await;
    let token = app.connect("bob@dylan.com", "toto1234!").await;

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user_id.as_str());
    assert_eq!(response.body["email"], "bob@dylan.com");
}

#[tokio::test]
async fn test_connect_rejects_bad_credentials() {
    let app = helpers::TestApp::new().await;
    app.create_user("bob@dylan.com", "toto1234!").await;

    let response = app.connect_raw("bob@dylan.com", "wrong").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, serde_json::json!({ "error": "Unauthorized" }));

    let response = app.connect_raw("nobody@example.com", "toto1234!").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/connect", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/users/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request("GET", "/users/me", None, Some("not-a-real-token"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Unauthorized");
}

#[tokio::test]
async fn test_disconnect_revokes_token() {
    let app = helpers::TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let response = app.request("GET", "/disconnect", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = app.request("GET", "/users/me", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/disconnect", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/disconnect", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_each_connect_issues_a_distinct_token() {
    let app = helpers::TestApp::new().await;
    app.create_user("bob@dylan.com", "toto1234!").await;

    let first = app.connect("bob@dylan.com", "toto1234!").await;
    let second = app.connect("bob@dylan.com", "toto1234!").await;
    assert_ne!(first, second);

    app.request("GET", "/disconnect", None, Some(&first)).await;
    let response = app.request("GET", "/users/me", None, Some(&second)).await;
    assert_eq!(response.status, StatusCode::OK);
}
