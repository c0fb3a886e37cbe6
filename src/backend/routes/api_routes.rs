/**
 * API Routes
 *
 * # Routes
 *
 * ## Authentication
 * - `POST /api/auth/register` - User registration
 * - `POST /api/auth/login` - User login (token + session cookie)
 * - `GET /api/auth/me` - Current user info
 *
 * ## Posts
 * - `GET /api/posts` - List posts (public)
 * - `POST /api/posts` - Create post
 * - `DELETE /api/posts/{id}` - Delete own post
 * - `GET /api/posts/debug/auth-header` - Auth diagnostic
 *
 * ## Uploads
 * - `POST /api/uploads` - Upload an image (public)
 *
 * Which of these require a caller is decided by the access policy in the
 * auth middleware, not here.
 */

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::posts::{create_post, debug_auth_header, delete_post, list_posts};
use crate::backend::server::state::AppState;
use crate::backend::uploads::upload_image;

/// Headroom for multipart boundaries and part headers on top of the file
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Configure API routes
///
/// `max_upload_bytes` raises the body limit on the upload route so that an
/// oversize file reaches the handler and gets its 400.
pub fn configure_api_routes(router: Router<AppState>, max_upload_bytes: usize) -> Router<AppState> {
    router
        // Authentication endpoints
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/me", get(get_me))
        // Post endpoints
        .route("/api/posts", get(list_posts).post(create_post))
        .route("/api/posts/{id}", delete(delete_post))
        .route("/api/posts/debug/auth-header", get(debug_auth_header))
        // Upload endpoint
        .route(
            "/api/uploads",
            post(upload_image).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
}
