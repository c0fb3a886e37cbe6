/**
 * Bearer Tokens
 *
 * Issues and validates the stateless JWT handed out at login. A token is
 * valid iff its HS256 signature verifies against the server secret and the
 * current time is strictly before `exp`. Nothing is stored server-side, so
 * there is no revocation: rotating the secret invalidates every token.
 */

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::backend::error::ApiError;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username
    pub sub: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Opaque verification failure
///
/// Malformed encoding, a bad signature and expiry all collapse into this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid token")]
pub struct InvalidToken;

/// Signs and verifies bearer tokens with a shared secret
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: chrono::Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec").field("ttl", &self.ttl).finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: chrono::Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Issue a token for `username`, valid from now for the configured TTL
    pub fn issue(&self, username: &str) -> Result<String, ApiError> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if the current time were `now`
    pub fn issue_at(&self, username: &str, now: DateTime<Utc>) -> Result<String, ApiError> {
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            ApiError::internal("token signing failed")
        })
    }

    /// Verify a token and return its username
    pub fn verify(&self, token: &str) -> Result<String, InvalidToken> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token as if the current time were `now`
    ///
    /// Expiry is checked here rather than by `jsonwebtoken` so that the
    /// boundary is exact (`now >= exp` is expired, no leeway) and so that the
    /// clock can be supplied by the caller.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, InvalidToken> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|e| {
                tracing::debug!("Token rejected: {:?}", e.kind());
                InvalidToken
            })?
            .claims;

        if now.timestamp() >= claims.exp {
            tracing::debug!("Token rejected: expired at {}", claims.exp);
            return Err(InvalidToken);
        }

        Ok(claims.sub)
    }
}
