/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * # Validation Order
 *
 * 1. username and password present and non-blank (400)
 * 2. username not already taken (409)
 * 3. birthday, when given, is an ISO date (400)
 * 4. bio at most 2000 characters (400)
 *
 * The pre-insert lookup gives the common case a clean 409; the UNIQUE
 * constraint still catches two registrations racing past it, and that
 * violation is mapped to the same 409 by `From<sqlx::Error>`.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{RegisterRequest, UserResponse};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::users::{create_user, get_user_by_username, NewUser};
use crate::backend::error::ApiError;
use crate::backend::extract::JsonBody;

/// Longest accepted bio, in characters
pub const MAX_BIO_CHARS: usize = 2000;

/// Register a new user
///
/// # Errors
///
/// * `400` - blank credentials, malformed birthday, bio too long
/// * `409` - username already taken
/// * `500` - store or hashing failure
pub async fn register(
    State(pool): State<SqlitePool>,
    State(hasher): State<PasswordHasher>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let username = non_blank(request.username);
    let password = non_blank(request.password);
    let (username, password) = match (username, password) {
        (Some(username), Some(password)) => (username, password),
        _ => return Err(ApiError::validation("username and password are required")),
    };

    tracing::info!("Registration request for: {}", username);

    if get_user_by_username(&pool, &username).await?.is_some() {
        tracing::warn!("Username already taken: {}", username);
        return Err(ApiError::conflict("username is already taken"));
    }

    let birthdate = parse_birthday(request.birthday.as_deref())?;

    if let Some(bio) = &request.bio {
        if bio.chars().count() > MAX_BIO_CHARS {
            return Err(ApiError::validation(format!(
                "bio must be at most {} characters",
                MAX_BIO_CHARS
            )));
        }
    }

    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password)).await??;

    let user = create_user(
        &pool,
        NewUser {
            username,
            password_hash,
            avatar_url: non_blank(request.avatar_url),
            birthdate,
            bio: request.bio,
        },
    )
    .await?;

    tracing::info!("User registered: {} ({})", user.username, user.id);

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_birthday(raw: Option<&str>) -> Result<Option<NaiveDate>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation("birthday must be an ISO date (YYYY-MM-DD)")),
    }
}
