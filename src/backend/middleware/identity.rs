/**
 * Identity Resolution
 *
 * Turns an inbound request into a `Principal`. Strategies are consulted in
 * order and the first one that recognises the caller wins:
 *
 * 1. `SessionStrategy` - the `SNSSESSION` cookie names a live session
 * 2. `BearerTokenStrategy` - `Authorization: Bearer <token>` verifies and
 *    its subject still exists in the user table
 *
 * Anything else is `Principal::Anonymous`. A bad or expired token is not an
 * error here: the request simply continues unauthenticated and the access
 * policy decides whether that is acceptable.
 */

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sqlx::SqlitePool;

use crate::backend::auth::session_store::{session_id_from_headers, SessionStore};
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;

/// Who is making the request
///
/// Inserted into request extensions by the authentication middleware and
/// read back by handlers as an extractor. A request that never went through
/// the middleware extracts as `Anonymous`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Principal {
    #[default]
    Anonymous,
    Authenticated { username: String },
}

impl Principal {
    pub fn authenticated(username: impl Into<String>) -> Self {
        Self::Authenticated {
            username: username.into(),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { username } => Some(username),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Principal>().cloned().unwrap_or_default())
    }
}

/// One way of recognising a caller
#[async_trait]
pub trait IdentityStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// `Ok(Some(username))` if this strategy authenticates the request,
    /// `Ok(None)` if it does not apply. `Err` is reserved for store failures.
    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<String>, ApiError>;
}

/// Recognises callers holding a live login session
#[derive(Debug, Clone)]
pub struct SessionStrategy {
    sessions: SessionStore,
}

impl SessionStrategy {
    pub fn new(sessions: SessionStore) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl IdentityStrategy for SessionStrategy {
    fn name(&self) -> &'static str {
        "session"
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<String>, ApiError> {
        let Some(session_id) = session_id_from_headers(headers) else {
            return Ok(None);
        };
        Ok(self.sessions.get(&session_id).await)
    }
}

/// Recognises callers presenting a valid bearer token
#[derive(Debug, Clone)]
pub struct BearerTokenStrategy {
    tokens: TokenCodec,
    pool: SqlitePool,
}

impl BearerTokenStrategy {
    pub fn new(tokens: TokenCodec, pool: SqlitePool) -> Self {
        Self { tokens, pool }
    }
}

/// Token part of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[async_trait]
impl IdentityStrategy for BearerTokenStrategy {
    fn name(&self) -> &'static str {
        "bearer"
    }

    async fn resolve(&self, headers: &HeaderMap) -> Result<Option<String>, ApiError> {
        let Some(token) = bearer_token(headers) else {
            return Ok(None);
        };

        let username = match self.tokens.verify(token) {
            Ok(username) => username,
            Err(_) => {
                tracing::debug!("Ignoring invalid bearer token");
                return Ok(None);
            }
        };

        match get_user_by_username(&self.pool, &username).await? {
            Some(user) => Ok(Some(user.username)),
            None => {
                tracing::warn!("Bearer token for unknown user: {}", username);
                Ok(None)
            }
        }
    }
}

/// Ordered chain of identity strategies
pub struct IdentityResolver {
    strategies: Vec<Box<dyn IdentityStrategy>>,
}

impl std::fmt::Debug for IdentityResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("IdentityResolver").field("strategies", &names).finish()
    }
}

impl IdentityResolver {
    pub fn new(strategies: Vec<Box<dyn IdentityStrategy>>) -> Self {
        Self { strategies }
    }

    /// Session first, then bearer token
    pub fn standard(sessions: SessionStore, tokens: TokenCodec, pool: SqlitePool) -> Self {
        Self::new(vec![
            Box::new(SessionStrategy::new(sessions)),
            Box::new(BearerTokenStrategy::new(tokens, pool)),
        ])
    }

    pub async fn resolve(&self, headers: &HeaderMap) -> Result<Principal, ApiError> {
        for strategy in &self.strategies {
            if let Some(username) = strategy.resolve(headers).await? {
                tracing::debug!("Authenticated {} via {}", username, strategy.name());
                return Ok(Principal::Authenticated { username });
            }
        }
        Ok(Principal::Anonymous)
    }
}
