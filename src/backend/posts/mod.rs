//! Posts Module
//!
//! Text posts: public listing, authenticated creation, owner-only deletion,
//! plus a diagnostic endpoint reporting how the current request was authenticated.
//!
//! - **`db`** - post persistence
//! - **`types`** - request/response bodies
//! - **`handlers`** - HTTP handlers

pub mod db;
pub mod handlers;
pub mod types;

pub use handlers::{create_post, debug_auth_header, delete_post, list_posts};
