//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /r/{id}`  - Weighted campaign redirect (public, not rate limited)
//! - `GET  /`        - Plain-text banner
//! - `GET  /health`  - Store health check
//! - `/api/*`        - Campaign management (rate limited)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api/*` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, index_handler, redirect_handler};
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
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let api_router = if behind_proxy {
        api::routes::admin_routes().layer(rate_limit::proxy_layer())
    } else {
        api::routes::admin_routes().layer(rate_limit::layer())
    };

    NormalizePathLayer::trim_trailing_slash().layer(compose_router(state, api_router))
}

/// Router with every route but no rate limiting or path normalization.
///
/// Used by in-process tests, where requests carry no peer address.
pub fn router(state: AppState) -> Router {
    compose_router(state, api::routes::admin_routes())
}

fn compose_router(state: AppState, api_router: Router<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/r/{id}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer())
}
