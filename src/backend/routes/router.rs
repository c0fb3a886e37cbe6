/**
 * Router Configuration
 *
 * Combines the API routes with static serving of uploaded images and wraps
 * everything in the middleware stack.
 *
 * # Layer Order (outermost first)
 *
 * 1. CORS - answers preflights before anything else sees them
 * 2. Trace - one span per request
 * 3. Authentication - resolves the principal and applies the access policy
 */

use axum::{
    http::{HeaderValue, Method},
    middleware, Router,
};
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::backend::error::ApiError;
use crate::backend::middleware::authenticate;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::ServerConfig;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let config = app_state.config.clone();

    let router = configure_api_routes(Router::new(), config.max_upload_bytes);

    // Uploaded images
    let router = router.nest_service("/uploads", ServeDir::new(&config.upload_dir));

    let router = router.fallback(|| async { ApiError::not_found("not found") });

    router
        .layer(middleware::from_fn_with_state(app_state.clone(), authenticate))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .with_state(app_state)
}

/// CORS for the configured origins; `*` mirrors whatever origin asked
///
/// Requested headers are always mirrored back.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins = &config.cors_allowed_origins;

    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::mirror_request()
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
