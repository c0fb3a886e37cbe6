/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables (after `.env` has been applied by the binary), with defaults
 * suitable for local development.
 *
 * # Configuration Sources
 *
 * | Variable               | Default                        |
 * |------------------------|--------------------------------|
 * | `SERVER_HOST`          | `0.0.0.0`                      |
 * | `SERVER_PORT`          | `8080`                         |
 * | `DATABASE_URL`         | `sqlite://snsapp.db?mode=rwc`  |
 * | `JWT_SECRET`           | random, generated per process  |
 * | `TOKEN_TTL_HOURS`      | `24`                           |
 * | `SESSION_TTL_MINUTES`  | `30`                           |
 * | `BCRYPT_COST`          | `bcrypt::DEFAULT_COST`         |
 * | `UPLOAD_DIR`           | `uploads`                      |
 * | `MAX_UPLOAD_BYTES`     | `5242880`                      |
 * | `CORS_ALLOWED_ORIGINS` | `http://localhost:3000`        |
 *
 * # Error Handling
 *
 * Unlike optional services, a malformed value is a hard error: the binary
 * logs it and exits with a non-zero status.
 */

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

/// Default maximum upload size (5 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Server configuration
///
/// `Debug` redacts `jwt_secret`.
#[derive(Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    pub bind_addr: SocketAddr,
    /// sqlx connection URL (SQLite)
    pub database_url: String,
    /// HMAC secret used to sign bearer tokens
    pub jwt_secret: String,
    /// Lifetime of an issued bearer token
    pub token_ttl: chrono::Duration,
    /// Idle lifetime of a legacy login session
    pub session_ttl: chrono::Duration,
    /// bcrypt work factor
    pub bcrypt_cost: u32,
    /// Directory uploaded images are written to and served from
    pub upload_dir: PathBuf,
    /// Largest accepted upload, in bytes
    pub max_upload_bytes: usize,
    /// Allowed CORS origins; `*` mirrors the request origin
    pub cors_allowed_origins: Vec<String>,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind_addr", &self.bind_addr)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl", &self.token_ttl)
            .field("session_ttl", &self.session_ttl)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("upload_dir", &self.upload_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            database_url: "sqlite://snsapp.db?mode=rwc".to_string(),
            jwt_secret: generate_secret(),
            token_ttl: chrono::Duration::hours(24),
            session_ttl: chrono::Duration::minutes(30),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            upload_dir: PathBuf::from("uploads"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cors_allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    ///
    /// Unset variables fall back to [`ServerConfig::default`]. A missing
    /// `JWT_SECRET` is tolerated with a warning: tokens then stop verifying
    /// whenever the process restarts.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host: IpAddr = parse_or(&lookup, "SERVER_HOST", defaults.bind_addr.ip())?;
        let port: u16 = parse_or(&lookup, "SERVER_PORT", defaults.bind_addr.port())?;

        let jwt_secret = match lookup("JWT_SECRET") {
            Some(secret) if !secret.trim().is_empty() => secret,
            Some(_) => return Err(ConfigError::MissingValue("JWT_SECRET")),
            None => {
                tracing::warn!("JWT_SECRET not set; using a random per-process secret");
                defaults.jwt_secret
            }
        };

        let token_ttl_hours: i64 = parse_or(&lookup, "TOKEN_TTL_HOURS", 24)?;
        let session_ttl_minutes: i64 = parse_or(&lookup, "SESSION_TTL_MINUTES", 30)?;
        if token_ttl_hours <= 0 {
            return Err(invalid("TOKEN_TTL_HOURS", token_ttl_hours));
        }
        if session_ttl_minutes <= 0 {
            return Err(invalid("SESSION_TTL_MINUTES", session_ttl_minutes));
        }

        let bcrypt_cost: u32 = parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", bcrypt_cost));
        }

        let cors_allowed_origins = match lookup("CORS_ALLOWED_ORIGINS") {
            Some(list) => list
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => defaults.cors_allowed_origins,
        };

        Ok(Self {
            bind_addr: SocketAddr::new(host, port),
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            token_ttl: chrono::Duration::hours(token_ttl_hours),
            session_ttl: chrono::Duration::minutes(session_ttl_minutes),
            bcrypt_cost,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            cors_allowed_origins,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key,
            value: raw,
        }),
        None => Ok(default),
    }
}

fn invalid(key: &'static str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
    }
}

fn generate_secret() -> String {
    format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple())
}
