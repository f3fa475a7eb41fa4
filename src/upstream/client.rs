//! Mailchimp HTTP client
//!
//! Talks to `https://<dc>.api.mailchimp.com/3.0` with HTTP basic auth and
//! classifies failures into [`UpstreamErrorKind`]s.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::types::{
    CampaignListParams, NewMember, ProblemDetail, RawAudienceList, RawCampaign,
    RawCampaignContent, RawCampaignList, RawMember,
};
use super::{MailchimpApi, UpstreamError, UpstreamErrorKind, UpstreamResult};
use crate::config::Config;
use crate::error::{GatewayError, Result};

/// Username sent with basic auth; Mailchimp ignores it.
const AUTH_USER: &str = "anystring";

/// Problem title Mailchimp uses when a subscriber is already on the list.
const MEMBER_EXISTS_TITLE: &str = "Member Exists";

// == Mailchimp Client ==
#[derive(Debug, Clone)]
pub struct MailchimpClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl MailchimpClient {
    // == Constructor ==
    /// Creates a client against an explicit base URL (no trailing slash).
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Builds a client from configuration.
    ///
    /// Fails with a configuration error when the API key is missing or no
    /// data-center prefix can be determined.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .mailchimp_api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Config("MAILCHIMP_API_KEY is not set".to_string()))?;
        let prefix = config.server_prefix().ok_or_else(|| {
            GatewayError::Config("Mailchimp server prefix could not be determined".to_string())
        })?;

        Self::new(
            format!("https://{}.api.mailchimp.com/3.0", prefix),
            api_key,
            Duration::from_secs(config.upstream_timeout),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http
            .get(format!("{}{}", self.base_url, path))
            .basic_auth(AUTH_USER, Some(&self.api_key))
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http
            .post(format!("{}{}", self.base_url, path))
            .basic_auth(AUTH_USER, Some(&self.api_key))
    }

    /// Sends a request and decodes a successful body into `T`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> UpstreamResult<T> {
        let response = request.send().await.map_err(|e| {
            let message = if e.is_timeout() {
                "Request to Mailchimp timed out".to_string()
            } else {
                e.to_string()
            };
            UpstreamError::other(e.status().map(|s| s.as_u16()), message)
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::other(Some(status.as_u16()), e.to_string()))?;

        if !status.is_success() {
            return Err(classify_failure(status, &body));
        }

        serde_json::from_slice(&body).map_err(|e| {
            UpstreamError::malformed(format!("Unexpected Mailchimp response shape: {}", e))
        })
    }
}

/// Maps a non-2xx response to an upstream error.
fn classify_failure(status: StatusCode, body: &[u8]) -> UpstreamError {
    let problem: ProblemDetail = serde_json::from_slice(body).unwrap_or_default();
    let message = problem
        .detail
        .clone()
        .or_else(|| problem.title.clone())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string());

    let kind = if status == StatusCode::NOT_FOUND {
        UpstreamErrorKind::NotFound
    } else if status == StatusCode::BAD_REQUEST
        && problem.title.as_deref() == Some(MEMBER_EXISTS_TITLE)
    {
        UpstreamErrorKind::MemberExists
    } else {
        UpstreamErrorKind::Other
    };

    UpstreamError::new(kind, Some(status.as_u16()), message)
}

#[async_trait]
impl MailchimpApi for MailchimpClient {
    async fn list_campaigns(&self, params: &CampaignListParams) -> UpstreamResult<RawCampaignList> {
        debug!(?params, "Fetching campaign list from Mailchimp");
        let count = params.count.to_string();
        let request = self.get("/campaigns").query(&[
            ("count", count.as_str()),
            ("status", params.status.as_str()),
            ("sort_field", params.sort_field.as_str()),
            ("sort_dir", params.sort_dir.as_str()),
        ]);
        self.send(request).await
    }

    async fn get_campaign(&self, campaign_id: &str) -> UpstreamResult<RawCampaign> {
        debug!(campaign_id, "Fetching campaign from Mailchimp");
        self.send(self.get(&format!("/campaigns/{}", campaign_id)))
            .await
    }

    async fn get_campaign_content(&self, campaign_id: &str) -> UpstreamResult<RawCampaignContent> {
        debug!(campaign_id, "Fetching campaign content from Mailchimp");
        self.send(self.get(&format!("/campaigns/{}/content", campaign_id)))
            .await
    }

    async fn list_audiences(&self) -> UpstreamResult<RawAudienceList> {
        debug!("Fetching audiences from Mailchimp");
        self.send(self.get("/lists")).await
    }

    async fn add_subscriber(
        &self,
        audience_id: &str,
        member: &NewMember,
    ) -> UpstreamResult<RawMember> {
        debug!(audience_id, status = %member.status, "Adding subscriber on Mailchimp");
        let request = self
            .post(&format!("/lists/{}/members", audience_id))
            .json(member);
        self.send(request).await
    }
}
