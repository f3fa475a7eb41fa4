//! API Module
//!
//! HTTP handlers and routing for the gateway REST API.
//!
//! # Endpoints
//! - `GET /api/campaigns` - Recent campaigns
//! - `GET /api/campaigns/:id` - Campaign detail
//! - `GET /api/campaigns/:id/content` - Campaign HTML
//! - `GET /api/audience/stats` - Audience statistics
//! - `POST /api/newsletter/subscribe` - Newsletter subscription
//! - `POST /api/cache/clear` - Cache invalidation
//! - `GET /api/cache/info` - Cache introspection
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
