//! Request and Response models for the gateway API
//!
//! This module defines the DTOs used for serializing/deserializing HTTP
//! bodies, and the public shapes upstream payloads are transformed into.

pub mod audience;
pub mod campaign;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use audience::AudienceStats;
pub use campaign::{campaign_html, CampaignDetail, CampaignSettings, CampaignSummary};
pub use requests::{CampaignListQuery, ClearCacheRequest, SubscribeRequest};
pub use responses::{
    ApiResponse, CacheInfo, CacheInfoResponse, ClearCacheResponse, ErrorResponse, HealthResponse, SubscribeResponse,
    SubscribedMember,
};
