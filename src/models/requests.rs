//! Request DTOs for the gateway API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::error::{GatewayError, Result};
use crate::upstream::CampaignListParams;

/// Largest page size Mailchimp accepts for campaign listings.
pub const MAX_CAMPAIGN_COUNT: u32 = 1000;

/// Query string for `GET /api/campaigns`.
///
/// Every field is optional and falls back to the listing defaults
/// (`count=5`, `status=sent`, `sortField=send_time`, `sortDir=DESC`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignListQuery {
    #[serde(default)]
    pub count: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sort_field: Option<String>,
    #[serde(default)]
    pub sort_dir: Option<String>,
}

impl CampaignListQuery {
    /// Resolves the query into upstream parameters, applying defaults.
    pub fn resolve(&self) -> Result<CampaignListParams> {
        let defaults = CampaignListParams::default();

        let count = match non_blank(&self.count) {
            Some(raw) => raw
                .parse::<u32>()
                .ok()
                .filter(|n| (1..=MAX_CAMPAIGN_COUNT).contains(n))
                .ok_or_else(|| {
                    GatewayError::Validation(format!(
                        "count must be an integer between 1 and {}",
                        MAX_CAMPAIGN_COUNT
                    ))
                })?,
            None => defaults.count,
        };

        Ok(CampaignListParams {
            count,
            status: non_blank(&self.status).map_or(defaults.status, str::to_string),
            sort_field: non_blank(&self.sort_field).map_or(defaults.sort_field, str::to_string),
            sort_dir: non_blank(&self.sort_dir)
                .map_or(defaults.sort_dir, |dir| dir.to_ascii_uppercase()),
        })
    }
}

/// Request body for `POST /api/newsletter/subscribe`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: Option<String>,
}

impl SubscribeRequest {
    /// Returns the trimmed email, or a validation error when it is missing.
    pub fn email(&self) -> Result<String> {
        non_blank(&self.email)
            .map(str::to_string)
            .ok_or_else(|| GatewayError::Validation("Email is required".to_string()))
    }
}

/// Request body for `POST /api/cache/clear`.
///
/// A missing or empty `key` clears the whole cache.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearCacheRequest {
    #[serde(default)]
    pub key: Option<String>,
}

impl ClearCacheRequest {
    pub fn key(&self) -> Option<&str> {
        non_blank(&self.key)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
