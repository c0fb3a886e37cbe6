//! Server Module
//!
//! - **`config`** - environment-driven `ServerConfig`
//! - **`state`** - `AppState` and its `FromRef` impls
//! - **`init`** - database connection, state assembly, app creation

pub mod config;
pub mod init;
pub mod state;

pub use config::{ConfigError, ServerConfig};
pub use init::{build_state, connect_database, create_app, StartupError};
pub use state::AppState;
