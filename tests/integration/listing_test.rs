//! Integration tests for paged listings.

mod helpers;

use http::StatusCode;
use serde_json::{Value, json};

use helpers::TestApp;

fn ids(body: &Value) -> Vec<String> {
    body.as_array()
        .expect("listing is a JSON array")
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_pages_partition_children_in_creation_order() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;
    let parent = app.create_folder(&token, "many", None).await;

    let mut created = Vec::new();
    for i in 0..45 {
        created.push(app.create_folder(&token, &format!("child-{i}"), Some(&parent)).await);
    }

    let mut seen = Vec::new();
    for (page, expected) in [(0, 20), (1, 20), (2, 5)] {
        let response = app
            .request(
                "GET",
                &format!("/files?parentId={parent}&page={page}"),
                None,
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);
        let page_ids = ids(&response.body);
        assert_eq!(page_ids.len(), expected, "page {page}");
        seen.extend(page_ids);
    }
    assert_eq!(seen, created);

    let response = app
        .request("GET", &format!("/files?parentId={parent}&page=5"), None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_default_listing_is_root_first_page() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;
    let top = app.create_folder(&token, "top", None).await;
    app.create_folder(&token, "nested", Some(&top)).await;

    for path in ["/files", "/files?parentId=0", "/files?page=abc"] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        assert_eq!(ids(&response.body), vec![top.clone()], "{path}");
        assert_eq!(response.body[0]["parentId"], 0);
    }
}

#[tokio::test]
async fn test_listing_another_users_folder_is_empty() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;
    let folder = app.create_folder(&bob, "bobs", None).await;
    app.create_folder(&bob, "inside", Some(&folder)).await;

    let response = app
        .request("GET", &format!("/files?parentId={folder}"), None, Some(&eve))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));

    let response = app.request("GET", "/files", None, Some(&eve)).await;
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_malformed_parent_id_lists_nothing() {
    let app = TestApp::new().await;
    let token = app.signed_in("bob@dylan.com").await;
    app.create_folder(&token, "top", None).await;

    let response = app
        .request("GET", "/files?parentId=not-an-id", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_list_mine_spans_all_parents() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;

    let top = app.create_folder(&bob, "top", None).await;
    let nested = app.create_folder(&bob, "nested", Some(&top)).await;
    app.create_folder(&eve, "eves", None).await;

    let response = app.request("GET", "/files/me", None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(ids(&response.body), vec![top, nested]);

    let response = app.request("GET", "/files/me?page=1", None, Some(&bob)).await;
    assert_eq!(response.body, json!([]));
}
