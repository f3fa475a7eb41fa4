//! API Routes
//!
//! Configures the Axum router: the proxied Mailchimp routes and the cache
//! administration routes live under `/api`, health sits at the root.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    audience_stats_handler, cache_info_handler, campaign_content_handler, campaign_handler,
    clear_cache_handler, health_handler, list_campaigns_handler, subscribe_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: any origin, method and header
/// - Tracing: one span per request
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes())
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Cached reads
        .route("/campaigns", get(list_campaigns_handler))
        .route("/campaigns/:id", get(campaign_handler))
        .route("/campaigns/:id/content", get(campaign_content_handler))
        .route("/audience/stats", get(audience_stats_handler))
        // Passthrough
        .route("/newsletter/subscribe", post(subscribe_handler))
        // Cache administration
        .route("/cache/clear", post(clear_cache_handler))
        .route("/cache/info", get(cache_info_handler))
}
