//! Authentication Handlers Module
//!
//! # Handlers
//!
//! - **`register`** - POST /api/auth/register - User registration
//! - **`login`** - POST /api/auth/login - User authentication
//! - **`get_me`** - GET /api/auth/me - Current user info
//!
//! All three sit under `/api/auth/**`, which the access policy leaves open;
//! `get_me` checks the principal itself.

/// Request and response types
pub mod types;

/// Registration handler
pub mod register;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

pub use types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};

pub use login::login;
pub use me::get_me;
pub use register::register;
