/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is cloned into every request. Each field is either cheap to
 * clone or behind an `Arc`:
 * - `SqlitePool` - connection pool for users and posts
 * - `TokenCodec` / `PasswordHasher` - immutable credential primitives
 * - `SessionStore` - shared session table (`Arc<RwLock<HashMap>>` inside)
 * - `IdentityResolver` / `AccessPolicy` - consulted by the auth middleware
 * - `ServerConfig` - upload limits and directories
 *
 * # State Extraction
 *
 * Handlers extract only what they need, e.g. `State(pool): State<SqlitePool>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::session_store::SessionStore;
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::middleware::identity::IdentityResolver;
use crate::backend::middleware::policy::AccessPolicy;
use crate::backend::server::config::ServerConfig;

/// Shared state for every request handler and the auth middleware
#[derive(Clone, Debug)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub tokens: TokenCodec,
    pub hasher: PasswordHasher,
    pub sessions: SessionStore,
    /// Session-then-bearer identity chain
    pub identity: Arc<IdentityResolver>,
    pub policy: Arc<AccessPolicy>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Assemble state around an already-migrated pool
    pub fn new(config: ServerConfig, db_pool: SqlitePool) -> Self {
        let tokens = TokenCodec::new(config.jwt_secret.as_bytes(), config.token_ttl);
        let sessions = SessionStore::new(config.session_ttl);
        let identity =
            IdentityResolver::standard(sessions.clone(), tokens.clone(), db_pool.clone());

        Self {
            hasher: PasswordHasher::new(config.bcrypt_cost),
            identity: Arc::new(identity),
            policy: Arc::new(AccessPolicy::standard()),
            config: Arc::new(config),
            db_pool,
            tokens,
            sessions,
        }
    }
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for TokenCodec {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.hasher
    }
}

impl FromRef<AppState> for SessionStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
