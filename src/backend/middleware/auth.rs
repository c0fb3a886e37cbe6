/**
 * Authentication Middleware
 *
 * Runs once per request, ahead of every handler:
 *
 * 1. Resolve the caller through the identity chain
 * 2. Apply the access policy (401 for anonymous callers on protected routes)
 * 3. Insert the `Principal` into request extensions for handlers to extract
 */

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::backend::error::ApiError;
use crate::backend::server::state::AppState;

/// Authentication middleware, installed with `middleware::from_fn_with_state`
pub async fn authenticate(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let principal = app_state.identity.resolve(request.headers()).await?;

    app_state
        .policy
        .check(request.method(), request.uri().path(), &principal)?;

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
