//! Upstream Module
//!
//! The Mailchimp Marketing API as seen by the gateway: the fetcher trait the
//! proxy layer calls, the raw payload types, and the HTTP client.

mod client;
mod types;

use async_trait::async_trait;
use thiserror::Error;

pub use client::MailchimpClient;
pub use types::{
    CampaignListParams, NewMember, ProblemDetail, RawAudience, RawAudienceList, RawAudienceStats,
    RawCampaign, RawCampaignContent, RawCampaignList, RawCampaignSettings, RawMember,
};

// == Upstream Error ==
/// How an upstream failure should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamErrorKind {
    /// The requested resource does not exist upstream (HTTP 404)
    NotFound,
    /// The subscriber is already a member of the audience
    MemberExists,
    /// The response could not be decoded into the expected shape
    Malformed,
    /// Transport failures, timeouts and any other upstream status
    Other,
}

/// A failed call to the Mailchimp API.
#[derive(Error, Debug, Clone)]
#[error("Mailchimp request failed (status {}): {message}", status_label(.status))]
pub struct UpstreamError {
    pub kind: UpstreamErrorKind,
    /// HTTP status reported by Mailchimp, if a response was received
    pub status: Option<u16>,
    pub message: String,
}

fn status_label(status: &Option<u16>) -> String {
    status.map_or_else(|| "none".to_string(), |s| s.to_string())
}

impl UpstreamError {
    pub fn new(kind: UpstreamErrorKind, status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::NotFound, Some(404), message)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Malformed, None, message)
    }

    pub fn other(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(UpstreamErrorKind::Other, status, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == UpstreamErrorKind::NotFound
    }
}

pub type UpstreamResult<T> = std::result::Result<T, UpstreamError>;

// == Mailchimp API ==
/// The upstream operations the gateway proxies.
///
/// Implemented over HTTP by [`MailchimpClient`]; tests substitute fakes.
#[async_trait]
pub trait MailchimpApi: Send + Sync + 'static {
    async fn list_campaigns(&self, params: &CampaignListParams) -> UpstreamResult<RawCampaignList>;

    async fn get_campaign(&self, campaign_id: &str) -> UpstreamResult<RawCampaign>;

    async fn get_campaign_content(&self, campaign_id: &str) -> UpstreamResult<RawCampaignContent>;

    async fn list_audiences(&self) -> UpstreamResult<RawAudienceList>;

    async fn add_subscriber(&self, audience_id: &str, member: &NewMember)
        -> UpstreamResult<RawMember>;
}
