/**
 * Authentication Handler Types
 *
 * Request and response bodies used by the register, login and me handlers.
 * JSON field names are camelCase on the wire.
 */

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::auth::users::User;

/// Registration request
///
/// Every field is optional at the JSON level so that a missing username or
/// password surfaces as a 400 from the handler rather than a body rejection.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// URL previously returned by the upload endpoint
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`); blank is treated as absent
    #[serde(default)]
    pub birthday: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login response
///
/// The same token is also usable as `Authorization: Bearer <token>`; the
/// session cookie is set alongside it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}

/// User response (without sensitive data)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub bio: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            avatar_url: user.avatar_url,
            birthdate: user.birthdate,
            bio: user.bio,
        }
    }
}
