use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post creation request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub content: Option<String>,
}

/// Post as returned to clients
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub content: String,
    /// Null for legacy posts without an author
    pub author_username: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of a successful delete
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeletedResponse {
    pub message: String,
}

/// Result of the auth-header diagnostic
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AuthHeaderReport {
    pub security_context_authenticated: bool,
    pub username: Option<String>,
    pub authorization_header_present: bool,
    pub authorization_header_masked: Option<String>,
}
