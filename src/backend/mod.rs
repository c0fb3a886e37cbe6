//! Backend Module
//!
//! This module contains all server-side code: the Axum HTTP server,
//! authentication, posts, uploads and persistence (SQLite via sqlx).
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - Route table and router assembly
//! - **`auth`** - Users, passwords, tokens, sessions, auth handlers
//! - **`middleware`** - Identity resolution and the access policy
//! - **`posts`** - Post storage and handlers
//! - **`uploads`** - Image upload handling
//! - **`error`** - Backend-specific error types
//! - **`extract`** - Body and path extractors that reject with `ApiError`
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Configuration, state, initialization
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── posts/          - Posts
//! ├── uploads/        - Image uploads
//! ├── error/          - Error types
//! └── extract.rs      - Request extractors
//! ```
//!
//! # Request Pipeline
//!
//! CORS → trace → authenticate (identity chain, access policy) → handler.
//! Handlers receive the caller as a `Principal` extractor argument.
//!
//! # Error Handling
//!
//! Handlers and middleware return `Result<_, ApiError>`; `ApiError` renders
//! as `{"error": ..., "status": ...}` with the matching status code.
//! Malformed JSON bodies, path parameters and multipart requests are
//! rejected through the same type.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Request extractors
pub mod extract;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Text posts
pub mod posts;

/// Image uploads
pub mod uploads;

pub use error::ApiError;
pub use server::create_app;
