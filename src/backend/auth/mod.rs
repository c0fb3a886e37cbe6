//! Authentication Module
//!
//! This module handles credential storage, password hashing, bearer token
//! issuance and the legacy login session. It provides the HTTP handlers for
//! registration, login and the current-user lookup.
//!
//! # Architecture
//!
//! - **`users`** - User model and database operations
//! - **`password`** - bcrypt hashing and verification
//! - **`tokens`** - HS256 bearer token issue/verify
//! - **`session_store`** - In-memory login sessions carried in a cookie
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs            - Module exports and documentation
//! ├── users.rs          - User model and database operations
//! ├── password.rs       - Password hashing
//! ├── tokens.rs         - Bearer token codec
//! ├── session_store.rs  - Legacy session table
//! └── handlers/         - HTTP handlers
//!     ├── mod.rs        - Handler exports
//!     ├── types.rs      - Request/response types
//!     ├── register.rs   - User registration handler
//!     ├── login.rs      - User authentication handler
//!     └── me.rs         - Get current user handler
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: username + password → user stored with a bcrypt hash → 201
//! 2. **Login**: credentials verified → bearer token issued and a session opened
//! 3. **Requests**: the identity chain (session cookie, then bearer token)
//!    resolves a `Principal` for every request
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless; rotating `JWT_SECRET` invalidates all of them
//! - Unknown user and wrong password return the same 401 body

/// User data model and database operations
pub mod users;

/// Password hashing
pub mod password;

/// Bearer token generation and validation
pub mod tokens;

/// Legacy login sessions
pub mod session_store;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{LoginRequest, LoginResponse, RegisterRequest, UserResponse};
pub use handlers::{get_me, login, register};
pub use password::PasswordHasher;
pub use session_store::{SessionStore, SESSION_COOKIE};
pub use tokens::{InvalidToken, TokenCodec};
