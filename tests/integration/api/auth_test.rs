//! Authentication API integration tests

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::*;

#[tokio::test]
async fn test_register_returns_public_profile() {
    let app = spawn_app().await;
    let response = app
        .post_json(
            "/api/auth/register",
            None,
            json!({
                "username": "alice",
                "password": "pw1",
                "avatarUrl": "/uploads/a.png",
                "birthday": "1990-04-01",
                "bio": "hello"
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let body = response.json();
    assert_eq!(body["username"], "alice");
    assert_eq!(body["avatarUrl"], "/uploads/a.png");
    assert_eq!(body["birthdate"], "1990-04-01");
    assert_eq!(body["bio"], "hello");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_validation_errors() {
    let app = spawn_app().await;

    let blank = app.register("", "pw1").await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.json()["status"], 400);

    let missing = app.post_json("/api/auth/register", None, json!({})).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);

    let bad_date = app
        .post_json(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "pw1", "birthday": "April 1st" }),
        )
        .await;
    assert_eq!(bad_date.status, StatusCode::BAD_REQUEST);

    let long_bio = app
        .post_json(
            "/api/auth/register",
            None,
            json!({ "username": "alice", "password": "pw1", "bio": "x".repeat(2001) }),
        )
        .await;
    assert_eq!(long_bio.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_register_is_conflict_regardless_of_password() {
    let app = spawn_app().await;
    assert_eq!(app.register("alice", "pw1").await.status, StatusCode::CREATED);
    assert_eq!(app.register("alice", "pw1").await.status, StatusCode::CONFLICT);
    assert_eq!(app.register("alice", "other").await.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_issues_verifiable_token() {
    let app = spawn_app().await;
    app.register("alice", "pw1").await;

    let response = app.login("alice", "pw1").await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["username"], "alice");
    assert!(body["message"].is_string());

    let token = body["token"].as_str().unwrap();
    assert_eq!(app.state.tokens.verify(token).unwrap(), "alice");
}

#[tokio::test]
async fn test_bad_credentials_are_indistinguishable() {
    let app = spawn_app().await;
    app.register("alice", "pw1").await;

    let wrong_password = app.login("alice", "pw2").await;
    let unknown_user = app.login("mallory", "pw1").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
    assert!(wrong_password.headers.get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_me_with_token() {
    let app = spawn_app().await;
    let token = app.signed_up("alice", "pw1").await;

    let response = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["username"], "alice");
}

#[tokio::test]
async fn test_me_anonymous_is_unauthorized() {
    let app = spawn_app().await;
    let response = app.get("/api/auth/me", None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.get("/api/auth/me", Some("not-a-token")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_cookie_authenticates() {
    let app = spawn_app().await;
    app.register("alice", "pw1").await;
    let login = app.login("alice", "pw1").await;
    let cookie = session_cookie(&login);
    assert!(cookie.starts_with("SNSSESSION="));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/posts")
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "content": "via session" }).to_string()))
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["authorUsername"], "alice");
}

#[tokio::test]
async fn test_expired_token_on_public_route_is_anonymous() {
    let app = spawn_app().await;
    app.register("alice", "pw1").await;
    let expired = app
        .state
        .tokens
        .issue_at("alice", chrono::Utc::now() - chrono::Duration::days(2))
        .unwrap();

    let listing = app.get("/api/posts", Some(&expired)).await;
    assert_eq!(listing.status, StatusCode::OK);

    let create = app.create_post(&expired, "too late").await;
    assert_eq!(create.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = spawn_app().await;
    app.register("alice", "pw1").await;
    let foreign = snsapp::backend::auth::TokenCodec::new(b"other-secret", chrono::Duration::hours(1))
        .issue("alice")
        .unwrap();

    let response = app.create_post(&foreign, "forged").await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cors_preflight_is_answered() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/posts")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}

#[tokio::test]
async fn test_cors_preflight_mirrors_requested_headers() {
    let app = spawn_app().await;
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/posts")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "x-requested-with,x-client-version")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
        "x-requested-with,x-client-version"
    );
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}
