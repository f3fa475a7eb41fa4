//! API Handlers
//!
//! HTTP request handlers for each gateway endpoint. Handlers only extract
//! input and render output; the cache policy lives in [`MailchimpGateway`].

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use tracing::{info, warn};

use crate::cache::{self, CacheStore, SharedStore};
use crate::config::Config;
use crate::error::{ApiError, GatewayError};
use crate::models::{
    ApiResponse, AudienceStats, CacheInfoResponse, CampaignDetail, CampaignListQuery,
    CampaignSummary, ClearCacheRequest, ClearCacheResponse, HealthResponse, SubscribeRequest,
    SubscribeResponse,
};
use crate::proxy::{Cached, GatewaySettings, MailchimpGateway};
use crate::upstream::{MailchimpApi, MailchimpClient};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Per-route operations over the shared cache
    pub gateway: MailchimpGateway,
    /// The cache store, also swept by the cleanup task
    pub cache: SharedStore,
    /// Include error details in failure responses
    pub expose_error_details: bool,
}

impl AppState {
    /// Creates a new AppState around an explicitly constructed store.
    pub fn new(
        api: Option<Arc<dyn MailchimpApi>>,
        store: CacheStore,
        settings: GatewaySettings,
        expose_error_details: bool,
    ) -> Self {
        let cache = cache::shared(store);
        Self {
            gateway: MailchimpGateway::new(api, cache.clone(), settings),
            cache,
            expose_error_details,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// A missing or unusable API key is logged and leaves the gateway without
    /// an upstream client; the proxied routes then answer with a configuration
    /// error.
    pub fn from_config(config: &Config) -> Self {
        let api: Option<Arc<dyn MailchimpApi>> = match MailchimpClient::from_config(config) {
            Ok(client) => {
                info!("Mailchimp client targeting {}", client.base_url());
                Some(Arc::new(client))
            }
            Err(e) => {
                warn!("Mailchimp client unavailable: {}", e);
                None
            }
        };
        if config.mailchimp_audience_id.is_none() {
            warn!("MAILCHIMP_AUDIENCE_ID is not set, subscriptions are disabled");
        }

        let settings = GatewaySettings {
            audience_id: config.mailchimp_audience_id.clone(),
            subscribe_status: config.subscribe_status().to_string(),
        };
        Self::new(
            api,
            CacheStore::new(config.cache_ttl),
            settings,
            config.expose_error_details,
        )
    }

    /// Renders a gateway error with this deployment's detail setting.
    pub fn reject(&self, error: GatewayError) -> ApiError {
        error.with_details(self.expose_error_details)
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

fn envelope<T>(result: Cached<T>) -> Json<ApiResponse<T>> {
    Json(ApiResponse::new(result.value, result.cached))
}

/// Handler for GET /api/campaigns
pub async fn list_campaigns_handler(
    State(state): State<AppState>,
    Query(query): Query<CampaignListQuery>,
) -> ApiResult<ApiResponse<Vec<CampaignSummary>>> {
    state
        .gateway
        .campaigns(&query)
        .await
        .map(envelope)
        .map_err(|e| state.reject(e))
}

/// Handler for GET /api/campaigns/:id
pub async fn campaign_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<CampaignDetail>> {
    state
        .gateway
        .campaign(&id)
        .await
        .map(envelope)
        .map_err(|e| state.reject(e))
}

/// Handler for GET /api/campaigns/:id/content
pub async fn campaign_content_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<String>> {
    state
        .gateway
        .campaign_content(&id)
        .await
        .map(envelope)
        .map_err(|e| state.reject(e))
}

/// Handler for GET /api/audience/stats
pub async fn audience_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<ApiResponse<Vec<AudienceStats>>> {
    state
        .gateway
        .audience_stats()
        .await
        .map(envelope)
        .map_err(|e| state.reject(e))
}

/// Handler for POST /api/newsletter/subscribe
///
/// A missing or unparseable body is treated like a body without `email`.
pub async fn subscribe_handler(
    State(state): State<AppState>,
    body: Option<Json<SubscribeRequest>>,
) -> ApiResult<SubscribeResponse> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    state
        .gateway
        .subscribe(&request)
        .await
        .map(Json)
        .map_err(|e| state.reject(e))
}

/// Handler for POST /api/cache/clear
///
/// Clears one key when `key` is given, otherwise the whole cache.
pub async fn clear_cache_handler(
    State(state): State<AppState>,
    body: Option<Json<ClearCacheRequest>>,
) -> Json<ClearCacheResponse> {
    let request = body.map(|Json(req)| req).unwrap_or_default();
    let key = request.key();
    state.gateway.clear_cache(key).await;
    Json(ClearCacheResponse::new(key))
}

/// Handler for GET /api/cache/info
pub async fn cache_info_handler(State(state): State<AppState>) -> Json<CacheInfoResponse> {
    Json(CacheInfoResponse::new(state.gateway.cache_info().await))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
