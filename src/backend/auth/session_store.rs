/**
 * Login Sessions
 *
 * The stateful counterpart to bearer tokens: a successful login also opens a
 * server-side session whose id travels in the `SNSSESSION` cookie. Sessions
 * live in process memory and expire after an idle TTL; every successful
 * lookup refreshes `last_seen`.
 */

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::{header::COOKIE, HeaderMap};
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// Cookie carrying the session id
pub const SESSION_COOKIE: &str = "SNSSESSION";

#[derive(Debug, Clone)]
struct Session {
    username: String,
    last_seen: DateTime<Utc>,
}

/// Shared, process-local session table
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(ttl: chrono::Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Open a session for `username` and return its id
    pub async fn create(&self, username: &str) -> String {
        let id = format!("{}{}", uuid::Uuid::new_v4().simple(), uuid::Uuid::new_v4().simple());
        self.sessions.write().await.insert(
            id.clone(),
            Session {
                username: username.to_string(),
                last_seen: Utc::now(),
            },
        );
        id
    }

    /// Look up a live session, refreshing its idle timer
    pub async fn get(&self, id: &str) -> Option<String> {
        self.get_at(id, Utc::now()).await
    }

    pub async fn get_at(&self, id: &str, now: DateTime<Utc>) -> Option<String> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(id)?;
        if now - session.last_seen >= self.ttl {
            sessions.remove(id);
            return None;
        }
        session.last_seen = now;
        Some(session.username.clone())
    }

    /// Drop every session idle for longer than the TTL
    pub async fn purge_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, session| now - session.last_seen < self.ttl);
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// `Set-Cookie` value for a freshly created session
    pub fn cookie_header(&self, id: &str) -> String {
        format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            id,
            self.ttl.num_seconds()
        )
    }
}

/// Extract the session id from the request's `Cookie` headers
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, id)| id.to_string())
        .filter(|id| !id.is_empty())
}
