//! Common test utilities and helpers
//!
//! - an in-memory application (`TestApp`) driven with `tower::ServiceExt::oneshot`
//! - request helpers for JSON and multipart bodies
//! - authentication helpers (register, login, session cookie)

#![allow(dead_code)]

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use snsapp::backend::routes::create_router;
use snsapp::backend::server::{build_state, AppState, ServerConfig};
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";
pub const BOUNDARY: &str = "snsapp-test-boundary";

/// Router plus the state behind it
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    /// Kept alive for the duration of the test
    pub upload_dir: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

pub async fn spawn_app_with(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let upload_dir = tempfile::tempdir().unwrap();
    let mut config = ServerConfig {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        bcrypt_cost: 4,
        upload_dir: upload_dir.path().to_path_buf(),
        ..ServerConfig::default()
    };
    configure(&mut config);

    let state = build_state(config).await.unwrap();
    let router = create_router(state.clone());

    TestApp {
        router,
        state,
        upload_dir,
    }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        json: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match json {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).unwrap()).await
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::GET, path, token, None).await
    }

    pub async fn post_json(&self, path: &str, token: Option<&str>, json: Value) -> TestResponse {
        self.request(Method::POST, path, token, Some(json)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> TestResponse {
        self.request(Method::DELETE, path, token, None).await
    }

    pub async fn register(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/register",
            None,
            serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    pub async fn login(&self, username: &str, password: &str) -> TestResponse {
        self.post_json(
            "/api/auth/login",
            None,
            serde_json::json!({ "username": username, "password": password }),
        )
        .await
    }

    /// Register and log in, returning the bearer token
    pub async fn signed_up(&self, username: &str, password: &str) -> String {
        assert_eq!(self.register(username, password).await.status, StatusCode::CREATED);
        let response = self.login(username, password).await;
        assert_eq!(response.status, StatusCode::OK);
        response.json()["token"].as_str().unwrap().to_string()
    }

    pub async fn create_post(&self, token: &str, content: &str) -> TestResponse {
        self.post_json(
            "/api/posts",
            Some(token),
            serde_json::json!({ "content": content }),
        )
        .await
    }

    /// POST an arbitrary body, with the given Content-Type if any
    pub async fn post_raw(
        &self,
        path: &str,
        token: Option<&str>,
        content_type: Option<&str>,
        body: &'static str,
    ) -> TestResponse {
        let mut builder = Request::builder().method(Method::POST).uri(path);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        self.send(builder.body(Body::from(body)).unwrap()).await
    }

    pub async fn upload(&self, part: MultipartFile<'_>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/uploads")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(&part)))
            .unwrap();
        self.send(request).await
    }
}

/// `name=value` of the session cookie in a login response
pub fn session_cookie(response: &TestResponse) -> String {
    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

/// One file part of a multipart request
pub struct MultipartFile<'a> {
    pub field: &'a str,
    pub filename: &'a str,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> MultipartFile<'a> {
    pub fn image(content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            field: "file",
            filename: "avatar",
            content_type: Some(content_type),
            data,
        }
    }
}

pub fn multipart_body(part: &MultipartFile<'_>) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            part.field, part.filename
        )
        .as_bytes(),
    );
    if let Some(content_type) = part.content_type {
        body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
    }
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(part.data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
pub const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0, 0x10, b'J', b'F', b'I', b'F'];
pub const GIF_BYTES: &[u8] = b"GIF89a\x01\x00\x01\x00";
