//! Integration tests for creating, reading, publishing, and deleting items.

mod helpers;

use http::StatusCode;
use serde_json::json;

use helpers::{TestApp, encode};

#[tokio::test]
async fn test_file_routes_require_token() {
    let app = TestApp::new().await;
    let id = "00000000-0000-0000-0000-000000000000";

    let cases = [
        ("POST", "/files".to_string()),
        ("GET", "/files".to_string()),
        ("GET", "/files/me".to_string()),
        ("GET", format!("/files/{id}")),
        ("PUT", format!("/files/{id}/publish")),
        ("PUT", format!("/files/{id}/unpublish")),
        ("DELETE", format!("/files/{id}")),
    ];
    for (method, path) in cases {
        let response = app
            .request(method, &path, Some(json!({ "name": "x", "type": "folder" })), None)
            .await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.body, json!({ "error": "Unauthorized" }));
    }
}

#[tokio::test]
async fn test_create_folder_shape() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;
    let me = app.request("GET", "/users/me", None, Some(&token)).await;

    let body = app
        .create_file(&token, json!({ "name": "images", "type": "folder" }))
        .await;

    assert!(body["id"].is_string());
    assert_eq!(body["userId"], me.body["id"]);
    assert_eq!(body["name"], "images");
    assert_eq!(body["type"], "folder");
    assert_eq!(body["isPublic"], false);
    assert_eq!(body["parentId"], 0);
    assert!(body.get("localPath").is_none());
}

#[tokio::test]
async fn test_create_validation_messages() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let cases = [
        (json!({ "type": "folder" }), "Missing name"),
        (json!({ "name": "", "type": "folder" }), "Missing name"),
        (json!({ "name": "x" }), "Missing type"),
        (json!({ "name": "x", "type": "directory" }), "Missing type"),
        (json!({ "name": "x", "type": "file" }), "Missing data"),
        (json!({ "name": "x", "type": "image" }), "Missing data"),
        (
            json!({ "name": "x", "type": "folder", "parentId": "00000000-0000-0000-0000-000000000000" }),
            "Parent not found",
        ),
        (
            json!({ "name": "x", "type": "folder", "parentId": "garbage" }),
            "Parent not found",
        ),
        (json!({}), "Missing name"),
        (json!({ "type": 7 }), "Missing name"),
        (json!({ "name": 12, "type": "folder" }), "Missing name"),
        (json!({ "name": "x", "type": 7 }), "Missing type"),
        (json!({ "name": "x", "type": "file", "data": 5 }), "Missing data"),
        (json!([1, 2]), "Missing name"),
    ];

    for (body, message) in cases {
        let response = app.request("POST", "/files", Some(body.clone()), Some(&token)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(response.body, json!({ "error": message }), "{body}");
    }

    let response = app.request("POST", "/files", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "Missing name" }));
}

#[tokio::test]
async fn test_create_ignores_non_bool_visibility() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let body = app
        .create_file(&token, json!({ "name": "d", "type": "folder", "isPublic": "yes" }))
        .await;
    assert_eq!(body["isPublic"], false);
}

#[tokio::test]
async fn test_parent_must_be_a_folder() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let file = app
        .create_file(
            &token,
            json!({ "name": "a.txt", "type": "file", "data": encode(b"Hello Webstack!") }),
        )
        .await;

    let response = app
        .request(
            "POST",
            "/files",
            Some(json!({ "name": "x", "type": "folder", "parentId": file["id"] })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Parent not found");
}

#[tokio::test]
async fn test_create_nested_file_and_get_it() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;
    let folder_id = app.create_folder(&token, "docs", None).await;

    let file = app
        .create_file(
            &token,
            json!({
                "name": "hello.txt",
                "type": "file",
                "parentId": folder_id,
                "isPublic": true,
                "data": encode(b"Hello Webstack!"),
            }),
        )
        .await;
    assert_eq!(file["parentId"], folder_id.as_str());
    assert_eq!(file["isPublic"], true);

    let id = file["id"].as_str().unwrap();
    let response = app
        .request("GET", &format!("/files/{id}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, file);
}

#[tokio::test]
async fn test_root_parent_accepts_string_zero() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let body = app
        .create_file(&token, json!({ "name": "d", "type": "folder", "parentId": "0" }))
        .await;
    assert_eq!(body["parentId"], 0);
}

#[tokio::test]
async fn test_get_by_id_is_owner_only() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;
    let id = app.create_folder(&bob, "private", None).await;

    let response = app.request("GET", &format!("/files/{id}"), None, Some(&eve)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Not found" }));

    let response = app.request("GET", "/files/not-an-id", None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body, json!({ "error": "Invalid id" }));
}

#[tokio::test]
async fn test_publish_and_unpublish() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;
    let id = app.create_folder(&bob, "share-me", None).await;

    for _ in 0..2 {
        let response = app
            .request("PUT", &format!("/files/{id}/publish"), None, Some(&bob))
            .await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body["isPublic"], true);
        assert_eq!(response.body["id"], id.as_str());
    }

    let response = app
        .request("PUT", &format!("/files/{id}/unpublish"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["isPublic"], false);

    let response = app
        .request("PUT", &format!("/files/{id}/publish"), None, Some(&eve))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .request("PUT", "/files/garbage/unpublish", None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder_removes_subtree() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;

    let top = app.create_folder(&token, "top", None).await;
    let sub = app.create_folder(&token, "sub", Some(&top)).await;
    let leaf = app
        .create_file(
            &token,
            json!({ "name": "leaf.txt", "type": "file", "parentId": sub, "data": encode(b"bye") }),
        )
        .await;
    let leaf_id = leaf["id"].as_str().unwrap().to_string();
    let sibling = app.create_folder(&token, "keep", None).await;

    let response = app
        .request("DELETE", &format!("/files/{top}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(response.bytes.is_empty());

    for id in [&top, &sub, &leaf_id] {
        let response = app.request("GET", &format!("/files/{id}"), None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{id}");
        let response = app
            .request("GET", &format!("/files/{id}/data"), None, Some(&token))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{id}");
    }

    let response = app
        .request("GET", &format!("/files/{sibling}"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_delete_by_non_owner_is_forbidden() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;
    let id = app.create_folder(&bob, "mine", None).await;

    let response = app.request("DELETE", &format!("/files/{id}"), None, Some(&eve)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.body, json!({ "error": "Forbidden" }));

    let response = app.request("GET", &format!("/files/{id}"), None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            "/files/00000000-0000-0000-0000-000000000000",
            None,
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cannot_nest_into_another_users_folder() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;
    let folder = app.create_folder(&bob, "bobs", None).await;

    let response = app
        .request(
            "POST",
            "/files",
            Some(json!({ "name": "sneaky", "type": "folder", "parentId": folder })),
            Some(&eve),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Parent not found");
}
