//! snsapp - Main Library
//!
//! A small social-posting backend: users register and log in, post short
//! text messages, delete their own posts and upload avatar images.
//!
//! # Overview
//!
//! The interesting part is authentication:
//! - passwords are stored as bcrypt hashes
//! - login issues a stateless HS256 bearer token and also opens a
//!   server-side session carried in the `SNSSESSION` cookie
//! - every request is resolved to a `Principal` by an ordered identity chain
//!   (session first, then bearer token) and checked against an access table
//!
//! # Module Structure
//!
//! - **`backend`** - the Axum server, its handlers, middleware and storage
//!
//! # Usage
//!
//! ```rust,no_run
//! use snsapp::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(ServerConfig::from_env()?).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Backend server-side code
pub mod backend;
