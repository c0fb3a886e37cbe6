//! Upload API integration tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::*;

#[tokio::test]
async fn test_upload_without_credentials_is_accepted() {
    let app = spawn_app().await;
    let response = app.upload(MultipartFile::image("image/png", PNG_BYTES)).await;

    assert_eq!(response.status, StatusCode::OK);
    let url = response.json()["url"].as_str().unwrap().to_string();
    assert!(url.starts_with("/uploads/"));
    assert!(url.ends_with(".png"));

    let name = url.trim_start_matches("/uploads/");
    let stored = std::fs::read(app.upload_dir.path().join(name)).unwrap();
    assert_eq!(stored, PNG_BYTES);
}

#[tokio::test]
async fn test_uploaded_file_is_served() {
    let app = spawn_app().await;
    let url = app.upload(MultipartFile::image("image/gif", GIF_BYTES)).await.json()["url"]
        .as_str()
        .unwrap()
        .to_string();

    let served = app.get(&url, None).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(&served.body[..], GIF_BYTES);
}

#[tokio::test]
async fn test_jpeg_gets_jpg_extension() {
    let app = spawn_app().await;
    let response = app.upload(MultipartFile::image("image/jpeg", JPEG_BYTES)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response.json()["url"].as_str().unwrap().ends_with(".jpg"));
}

#[tokio::test]
async fn test_declared_png_with_other_bytes_is_rejected() {
    let app = spawn_app().await;
    let response = app.upload(MultipartFile::image("image/png", JPEG_BYTES)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.upload(MultipartFile::image("image/png", b"plain text")).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disallowed_type_is_rejected() {
    let app = spawn_app().await;
    let response = app.upload(MultipartFile::image("image/webp", PNG_BYTES)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let app = spawn_app().await;
    let response = app
        .upload(MultipartFile {
            field: "file",
            filename: "avatar.png",
            content_type: None,
            data: PNG_BYTES,
        })
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_or_empty_file_is_rejected() {
    let app = spawn_app().await;
    let empty = app.upload(MultipartFile::image("image/png", b"")).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let wrong_field = app
        .upload(MultipartFile {
            field: "picture",
            filename: "avatar.png",
            content_type: Some("image/png"),
            data: PNG_BYTES,
        })
        .await;
    assert_eq!(wrong_field.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_oversize_file_is_rejected() {
    let app = spawn_app_with(|config| config.max_upload_bytes = 1024).await;

    let mut data = PNG_BYTES.to_vec();
    data.resize(1025, 0);
    let response = app.upload(MultipartFile::image("image/png", &data)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    data.truncate(1024);
    let response = app.upload(MultipartFile::image("image/png", &data)).await;
    assert_eq!(response.status, StatusCode::OK);
}
