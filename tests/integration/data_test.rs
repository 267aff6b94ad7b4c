//! Integration tests for content retrieval and image thumbnails.

mod helpers;

use std::io::Cursor;
use std::time::Duration;

use http::StatusCode;
use image::{DynamicImage, GenericImageView, ImageFormat, RgbImage};
use serde_json::json;

use helpers::{TestApp, encode};

fn png(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([200, 30, 90])))
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[tokio::test]
async fn test_private_data_visibility() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let eve = app.signed_in("eve@example.com").await;

    let file = app
        .create_file(
            &bob,
            json!({ "name": "hello.txt", "type": "file", "data": encode(b"Hello Webstack!\n") }),
        )
        .await;
    let id = file["id"].as_str().unwrap();
    let path = format!("/files/{id}/data");

    let response = app.request("GET", &path, None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body, json!({ "error": "Not found" }));

    let response = app.request("GET", &path, None, Some(&eve)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"Hello Webstack!\n");
    assert_eq!(response.content_type.as_deref(), Some("text/plain"));

    app.request("PUT", &format!("/files/{id}/publish"), None, Some(&bob))
        .await;

    for token in [None, Some(eve.as_str())] {
        let response = app.request("GET", &path, None, token).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.bytes, b"Hello Webstack!\n");
    }
}

#[tokio::test]
async fn test_invalid_token_reads_as_anonymous() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let file = app
        .create_file(
            &bob,
            json!({ "name": "pub.txt", "type": "file", "isPublic": true, "data": encode(b"hi") }),
        )
        .await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/files/{id}/data"), None, Some("stale-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, b"hi");
}

#[tokio::test]
async fn test_folder_has_no_content() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let folder = app
        .create_file(&bob, json!({ "name": "docs", "type": "folder", "isPublic": true }))
        .await;
    let id = folder["id"].as_str().unwrap();

    for token in [None, Some(bob.as_str())] {
        let response = app
            .request("GET", &format!("/files/{id}/data"), None, token)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.body,
            json!({ "error": "A folder doesn't have content" })
        );
    }
}

#[tokio::test]
async fn test_binary_round_trip_is_exact() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();

    let file = app
        .create_file(
            &bob,
            json!({ "name": "blob.bin", "type": "file", "data": encode(&payload) }),
        )
        .await;
    let id = file["id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.bytes, payload);
    assert_eq!(
        response.content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn test_undecodable_data_is_rejected() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;

    let response = app
        .request(
            "POST",
            "/files",
            Some(json!({ "name": "x.txt", "type": "file", "data": "%%%not base64%%%" })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "Invalid data");
}

#[tokio::test]
async fn test_image_thumbnails_are_generated() {
    let app = TestApp::new().await;
    let bob = app.signed_in("bob@dylan.com").await;

    let created = app
        .create_file(
            &bob,
            json!({ "name": "photo.png", "type": "image", "data": encode(&png(800, 400)) }),
        )
        .await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/files/{id}/data"), None, Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type.as_deref(), Some("image/png"));

    // The smallest size is written last.
    let mut ready = false;
    for _ in 0..200 {
        let response = app
            .request("GET", &format!("/files/{id}/data?size=100"), None, Some(&bob))
            .await;
        if response.status == StatusCode::OK {
            ready = true;
            break;
        }
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    assert!(ready, "thumbnails were never generated");

    for (size, dimensions) in [(500, (500, 250)), (250, (250, 125)), (100, (100, 50))] {
        let response = app
            .request("GET", &format!("/files/{id}/data?size={size}"), None, Some(&bob))
            .await;
        assert_eq!(response.status, StatusCode::OK, "size {size}");
        let decoded = image::load_from_memory(&response.bytes).unwrap();
        assert_eq!(decoded.dimensions(), dimensions, "size {size}");
    }

    for size in ["42", "huge"] {
        let response = app
            .request("GET", &format!("/files/{id}/data?size={size}"), None, Some(&bob))
            .await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "size {size}");
    }
}
