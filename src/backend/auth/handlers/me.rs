/**
 * Get Current User Handler
 *
 * GET /api/auth/me
 *
 * Lives in the `/api/auth` subtree so the access policy lets it through; the
 * handler rejects anonymous callers itself.
 */

use axum::{extract::State, response::Json};
use sqlx::SqlitePool;

use crate::backend::auth::handlers::types::UserResponse;
use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::middleware::Principal;

/// Return the profile of the resolved principal
///
/// # Errors
///
/// * `401 Unauthorized` - anonymous request
/// * `404 Not Found` - the principal's record no longer exists
pub async fn get_me(
    State(pool): State<SqlitePool>,
    principal: Principal,
) -> Result<Json<UserResponse>, ApiError> {
    let username = principal.username().ok_or(ApiError::Unauthorized)?;

    let user = get_user_by_username(&pool, username)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    Ok(Json(UserResponse::from(user)))
}
