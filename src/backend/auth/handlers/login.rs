/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Authentication Process
 *
 * 1. Look up user by username
 * 2. Verify password using bcrypt (on the blocking pool)
 * 3. Issue a bearer token
 * 4. Open a legacy session and set its cookie
 *
 * Unknown user and wrong password both return `ApiError::Unauthorized`, so
 * the response bodies are byte-identical. An unknown user still pays one
 * bcrypt round, so response time does not reveal which usernames exist.
 */

use axum::{
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Json},
};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::{LoginRequest, LoginResponse};
use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::session_store::SessionStore;
use crate::backend::auth::tokens::TokenCodec;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::extract::JsonBody;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - user not found or password incorrect
/// * `500 Internal Server Error` - store failure or token signing failure
pub async fn login(
    State(pool): State<SqlitePool>,
    State(hasher): State<PasswordHasher>,
    State(tokens): State<TokenCodec>,
    State(sessions): State<SessionStore>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Login request for: {}", request.username);

    let Some(user) = get_user_by_username(&pool, &request.username).await? else {
        tracing::warn!("User not found: {}", request.username);
        let password = request.password;
        tokio::task::spawn_blocking(move || hasher.verify_unknown(&password)).await?;
        return Err(ApiError::Unauthorized);
    };

    let password = request.password;
    let password_hash = user.password_hash.clone();
    let valid =
        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash)).await?;

    if !valid {
        tracing::warn!("Invalid password for user: {}", user.username);
        return Err(ApiError::Unauthorized);
    }

    let token = tokens.issue(&user.username)?;
    let session_id = sessions.create(&user.username).await;
    let cookie = sessions.cookie_header(&session_id);

    tracing::info!("User logged in successfully: {}", user.username);

    Ok((
        [(SET_COOKIE, cookie)],
        Json(LoginResponse {
            message: "login successful".to_string(),
            token,
            username: user.username,
        }),
    ))
}
