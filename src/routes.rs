//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check (public)
//! - `POST /api-token-auth`      - Credential exchange (public, rate limited)
//! - `/todo/*`                   - Todos (reads public, writes authenticated)
//! - `/general/*`                - Users and groups (authenticated)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the credential exchange
//! - **Authentication** - Bearer token resolved into a caller
//! - **Access policies** - Per route group
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - when `true`, the credential exchange is limited per peer
///   IP; requires serving with connect info
pub fn app_router(state: AppState, rate_limit: bool) -> NormalizePath<Router> {
    let token_router = if rate_limit {
        api::routes::token_routes().layer(rate_limit::secure_layer())
    } else {
        api::routes::token_routes()
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(token_router)
        .merge(api::routes::resource_routes(state.clone()))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
