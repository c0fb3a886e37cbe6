/**
 * Post Handlers
 *
 * - `GET /api/posts` - public listing, newest first
 * - `POST /api/posts` - create a post as the current principal
 * - `DELETE /api/posts/{id}` - delete a post; only its author may
 * - `GET /api/posts/debug/auth-header` - report how the request authenticated
 */

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    response::Json,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::backend::auth::users::get_user_by_username;
use crate::backend::error::ApiError;
use crate::backend::extract::{JsonBody, PathParam};
use crate::backend::middleware::identity::{bearer_token, Principal};
use crate::backend::posts::db;
use crate::backend::posts::types::{
    AuthHeaderReport, CreatePostRequest, DeletedResponse, PostResponse,
};

pub async fn list_posts(State(pool): State<SqlitePool>) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let posts = db::list_posts(&pool).await?;
    Ok(Json(posts.into_iter().map(PostResponse::from).collect()))
}

/// Create a post
///
/// # Errors
///
/// * `401` - anonymous caller
/// * `404` - the caller's user record is gone
/// * `400` - blank content
pub async fn create_post(
    State(pool): State<SqlitePool>,
    principal: Principal,
    JsonBody(request): JsonBody<CreatePostRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let username = principal.username().ok_or_else(|| {
        tracing::warn!("Post creation without authentication");
        ApiError::Unauthorized
    })?;

    let user = get_user_by_username(&pool, username)
        .await?
        .ok_or_else(|| ApiError::not_found("user not found"))?;

    let content = request
        .content
        .filter(|content| !content.trim().is_empty())
        .ok_or_else(|| ApiError::validation("content is required"))?;

    let post = db::insert_post(&pool, &content, Some(user.id)).await?;
    tracing::info!("Post {} created by {}", post.id, user.username);

    Ok(Json(PostResponse {
        id: post.id,
        content: post.content,
        author_username: Some(user.username),
        created_at: post.created_at,
    }))
}

/// Delete a post
///
/// Checks run in a fixed order: existence (404), authentication (401),
/// ownership (403). Authorless posts are never deletable.
pub async fn delete_post(
    State(pool): State<SqlitePool>,
    principal: Principal,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let post = db::get_post(&pool, id)
        .await?
        .ok_or_else(|| ApiError::not_found("post not found"))?;

    let username = principal.username().ok_or(ApiError::Unauthorized)?;

    let caller = get_user_by_username(&pool, username).await?;
    let is_author = match (post.user_id, caller) {
        (Some(author_id), Some(caller)) => author_id == caller.id,
        _ => false,
    };
    if !is_author {
        tracing::warn!("{} attempted to delete post {} they do not own", username, id);
        return Err(ApiError::Forbidden);
    }

    db::delete_post(&pool, id).await?;
    tracing::info!("Post {} deleted by {}", id, username);

    Ok(Json(DeletedResponse {
        message: "deleted".to_string(),
    }))
}

pub async fn debug_auth_header(principal: Principal, headers: HeaderMap) -> Json<AuthHeaderReport> {
    Json(AuthHeaderReport {
        security_context_authenticated: principal.is_authenticated(),
        username: principal.username().map(str::to_string),
        authorization_header_present: headers.contains_key(AUTHORIZATION),
        authorization_header_masked: bearer_token(&headers).map(mask_token),
    })
}

/// First eight characters, then the total length if anything was hidden
fn mask_token(token: &str) -> String {
    let total = token.chars().count();
    let visible: String = token.chars().take(8).collect();
    if total > 8 {
        format!("{}...(len={})", visible, total)
    } else {
        format!("{}...", visible)
    }
}
