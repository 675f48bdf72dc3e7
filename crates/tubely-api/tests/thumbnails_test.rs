//! Thumbnail upload integration tests.
//!
//! Run with: `cargo test -p tubely-api --test thumbnails_test`

mod helpers;

use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{png_bytes, thumbnail_form};
use helpers::media::FakeMediaTool;
use helpers::{setup_test_app, setup_test_app_with, PUBLIC_BASE_URL};
use serde_json::Value;
use tubely_core::VideoRecord;
use uuid::Uuid;

#[tokio::test]
async fn test_upload_thumbnail_to_storage() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<VideoRecord>();
    let expected_url = format!("{}/assets/{}.png", PUBLIC_BASE_URL, video.id);
    assert_eq!(body.thumbnail_url.as_deref(), Some(expected_url.as_str()));
    assert_eq!(body.user_id, owner);
    assert_eq!(body.video_url, None);

    let stored = app.stored_video(video.id).await;
    assert_eq!(stored.thumbnail_url, body.thumbnail_url);
    assert_eq!(app.stored_assets(), vec![format!("{}.png", video.id)]);
}

#[tokio::test]
async fn test_thumbnail_served_from_returned_url() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;
    let url = response.json::<VideoRecord>().thumbnail_url.unwrap();

    let path = url.strip_prefix(PUBLIC_BASE_URL).unwrap();
    let asset = app.client().get(path).await;
    assert_eq!(asset.status_code(), 200);
    assert_eq!(asset.as_bytes().as_ref(), png_bytes().as_slice());
}

#[tokio::test]
async fn test_reupload_overwrites_thumbnail() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    for data in [png_bytes(), b"second thumbnail".to_vec()] {
        let response = app
            .client()
            .post(&format!("/api/thumbnails/{}", video.id))
            .add_header("Authorization", app.bearer(owner))
            .multipart(thumbnail_form(data, "image/png"))
            .await;
        assert_eq!(response.status_code(), 200);
    }

    assert_eq!(app.stored_assets().len(), 1);
    let asset = app
        .client()
        .get(&format!("/assets/{}.png", video.id))
        .await;
    assert_eq!(asset.as_bytes().as_ref(), b"second thumbnail");
}

#[tokio::test]
async fn test_jpeg_extension_follows_content_type() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(vec![0xFF, 0xD8, 0xFF, 0xE0], "image/jpeg"))
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response
        .json::<VideoRecord>()
        .thumbnail_url
        .unwrap()
        .ends_with(&format!("{}.jpeg", video.id)));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["error"], "Couldn't find JWT");
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
    let app = setup_test_app().await;
    let video = app.create_video(Uuid::new_v4()).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", "Bearer not.a.jwt")
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["error"], "Couldn't validate JWT");
}

#[tokio::test]
async fn test_auth_checked_before_video_id() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .post("/api/thumbnails/not-a-uuid")
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
}

#[tokio::test]
async fn test_invalid_video_id() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    let response = app
        .client()
        .post("/api/thumbnails/not-a-uuid")
        .add_header("Authorization", app.bearer(user))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Invalid ID");
}

#[tokio::test]
async fn test_unknown_video() {
    let app = setup_test_app().await;
    let user = Uuid::new_v4();

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", Uuid::new_v4()))
        .add_header("Authorization", app.bearer(user))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Couldn't find video");
}

#[tokio::test]
async fn test_non_owner_leaves_record_unchanged() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(Uuid::new_v4()))
        .multipart(thumbnail_form(png_bytes(), "image/png"))
        .await;

    assert_eq!(response.status_code(), 401);
    assert_eq!(response.json::<Value>()["error"], "Unauthorized");
    assert_eq!(app.stored_video(video.id).await, video);
    assert!(app.stored_assets().is_empty());
}

#[tokio::test]
async fn test_disallowed_content_type() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(b"GIF89a".to_vec(), "image/gif"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Invalid file type");
    assert_eq!(app.stored_video(video.id).await.thumbnail_url, None);
    assert!(app.stored_assets().is_empty());
}

#[tokio::test]
async fn test_oversized_thumbnail_rejected() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    // Limit is 1 MiB in the test config
    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(vec![0u8; 1024 * 1024 + 1], "image/png"))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Unable to parse form file");
    assert_eq!(app.stored_video(video.id).await.thumbnail_url, None);
    assert!(app.stored_assets().is_empty());
}

#[tokio::test]
async fn test_missing_thumbnail_field() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(png_bytes()).file_name("x.png").mime_type("image/png"),
    );
    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Unable to parse form file");
}

#[tokio::test]
async fn test_duplicate_thumbnail_field() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let form = thumbnail_form(png_bytes(), "image/png").add_part(
        "thumbnail",
        Part::bytes(png_bytes()).file_name("y.png").mime_type("image/png"),
    );
    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(form)
        .await;

    assert_eq!(response.status_code(), 400);
    assert!(app.stored_assets().is_empty());
}

#[tokio::test]
async fn test_non_multipart_body() {
    let app = setup_test_app().await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .text("just text")
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.json::<Value>()["error"], "Unable to parse form file");
}

#[tokio::test]
async fn test_memory_strategy_serves_thumbnail() {
    let app = setup_test_app_with(
        &[("THUMBNAIL_STRATEGY", "memory")],
        FakeMediaTool::landscape(),
    )
    .await;
    let owner = Uuid::new_v4();
    let video = app.create_video(owner).await;

    let response = app
        .client()
        .post(&format!("/api/thumbnails/{}", video.id))
        .add_header("Authorization", app.bearer(owner))
        .multipart(thumbnail_form(png_bytes(), "image/png; charset=binary"))
        .await;

    assert_eq!(response.status_code(), 200);
    let url = response.json::<VideoRecord>().thumbnail_url.unwrap();
    assert_eq!(
        url,
        format!("{}/api/thumbnails/{}", PUBLIC_BASE_URL, video.id)
    );
    assert!(app.stored_assets().is_empty());
    assert!(app.thumbnails.get(video.id).await.is_some());

    // Served without a token
    let served = app
        .client()
        .get(url.strip_prefix(PUBLIC_BASE_URL).unwrap())
        .await;
    assert_eq!(served.status_code(), 200);
    assert_eq!(served.header("content-type"), "image/png");
    assert_eq!(served.as_bytes().as_ref(), png_bytes().as_slice());
}

#[tokio::test]
async fn test_memory_strategy_unknown_thumbnail() {
    let app = setup_test_app_with(
        &[("THUMBNAIL_STRATEGY", "memory")],
        FakeMediaTool::landscape(),
    )
    .await;

    let response = app
        .client()
        .get(&format!("/api/thumbnails/{}", Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 404);
    assert_eq!(response.json::<Value>()["error"], "Thumbnail not found");

    let response = app.client().get("/api/thumbnails/nope").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_store_strategy_has_no_thumbnail_get() {
    let app = setup_test_app().await;

    let response = app
        .client()
        .get(&format!("/api/thumbnails/{}", Uuid::new_v4()))
        .add_header("Authorization", app.bearer(Uuid::new_v4()))
        .await;
    assert_eq!(response.status_code(), 405);
}
