/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server,
 * including database connection, state creation, and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to SQLite and run embedded migrations
 * 2. Build `AppState` (token codec, hasher, session store, identity chain)
 * 3. Start the periodic session purge task
 * 4. Create the router
 *
 * Unlike optional services, the database is required: any failure here is a
 * `StartupError` and the binary exits.
 */

use std::str::FromStr;
use std::time::Duration;

use axum::Router;
use sqlx::migrate::MigrateError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;

use crate::backend::auth::session_store::SessionStore;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{ConfigError, ServerConfig};
use crate::backend::server::state::AppState;

/// How often expired sessions are swept
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(300);

/// Fatal errors raised while bringing the server up
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("migration error: {0}")]
    Migration(#[from] MigrateError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Open the database and apply migrations
///
/// In-memory URLs get a single long-lived connection, since every new
/// SQLite connection to `:memory:` would see its own empty database.
pub async fn connect_database(url: &str) -> Result<SqlitePool, StartupError> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("Database ready");

    Ok(pool)
}

/// Connect the database and assemble application state
pub async fn build_state(config: ServerConfig) -> Result<AppState, StartupError> {
    let pool = connect_database(&config.database_url).await?;
    Ok(AppState::new(config, pool))
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub async fn create_app(config: ServerConfig) -> Result<Router, StartupError> {
    tracing::info!("Initializing snsapp backend server");

    let app_state = build_state(config).await?;
    spawn_session_purge(app_state.sessions.clone());

    let app = create_router(app_state);
    tracing::info!("Router configured with periodic session purge");

    Ok(app)
}

/// Periodically drop idle sessions so the table does not grow unbounded
pub fn spawn_session_purge(sessions: SessionStore) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("Purged {} expired sessions", purged);
            }
        }
    })
}
