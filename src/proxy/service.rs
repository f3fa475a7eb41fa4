//! Per-route gateway operations.
//!
//! Each read operation checks configuration, validates its input, derives its
//! cache key, and fetches through [`ProxyCache`]. Subscription bypasses the cache.

use std::sync::Arc;

use tracing::info;

use super::cache::{Cached, ProxyCache};
use super::keys;
use crate::cache::SharedStore;
use crate::error::{GatewayError, Result};
use crate::models::{
    campaign_html, AudienceStats, CacheInfo, CampaignDetail, CampaignListQuery, CampaignSummary,
    SubscribeRequest, SubscribeResponse,
};
use crate::upstream::{MailchimpApi, NewMember};

// == Gateway Settings ==
/// Settings the gateway needs beyond the upstream client itself.
#[derive(Debug, Clone)]
pub struct GatewaySettings {
    /// Audience new subscribers are added to
    pub audience_id: Option<String>,
    /// Member status used for new subscriptions (`subscribed` or `pending`)
    pub subscribe_status: String,
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            audience_id: None,
            subscribe_status: "subscribed".to_string(),
        }
    }
}

// == Mailchimp Gateway ==
#[derive(Clone)]
pub struct MailchimpGateway {
    /// `None` when Mailchimp credentials are not configured
    api: Option<Arc<dyn MailchimpApi>>,
    cache: ProxyCache,
    settings: GatewaySettings,
}

impl MailchimpGateway {
    pub fn new(
        api: Option<Arc<dyn MailchimpApi>>,
        store: SharedStore,
        settings: GatewaySettings,
    ) -> Self {
        Self {
            api,
            cache: ProxyCache::new(store),
            settings,
        }
    }

    pub fn cache(&self) -> &ProxyCache {
        &self.cache
    }

    fn api(&self) -> Result<&dyn MailchimpApi> {
        self.api
            .as_deref()
            .ok_or_else(|| GatewayError::Config("Mailchimp API credentials are not configured".into()))
    }

    // == Campaigns ==
    /// Recent campaigns. Cached under one key regardless of the query.
    pub async fn campaigns(&self, query: &CampaignListQuery) -> Result<Cached<Vec<CampaignSummary>>> {
        let api = self.api()?;
        let params = query.resolve()?;

        self.cache
            .get_or_fetch(keys::CAMPAIGNS_LIST, || async move {
                api.list_campaigns(&params)
                    .await
                    .map(|list| {
                        list.campaigns
                            .into_iter()
                            .map(CampaignSummary::from)
                            .collect::<Vec<_>>()
                    })
                    .map_err(|e| {
                        GatewayError::from_upstream("Campaigns", "Failed to fetch campaigns", e)
                    })
            })
            .await
    }

    // == Campaign ==
    pub async fn campaign(&self, id: &str) -> Result<Cached<CampaignDetail>> {
        let api = self.api()?;
        let id = campaign_id(id)?;

        self.cache
            .get_or_fetch(&keys::campaign(id), || async move {
                api.get_campaign(id)
                    .await
                    .map(CampaignDetail::from)
                    .map_err(|e| GatewayError::from_upstream("Campaign", "Failed to fetch campaign", e))
            })
            .await
    }

    // == Campaign Content ==
    pub async fn campaign_content(&self, id: &str) -> Result<Cached<String>> {
        let api = self.api()?;
        let id = campaign_id(id)?;

        self.cache
            .get_or_fetch(&keys::campaign_content(id), || async move {
                api.get_campaign_content(id)
                    .await
                    .and_then(campaign_html)
                    .map_err(|e| {
                        GatewayError::from_upstream(
                            "Campaign",
                            "Failed to fetch campaign content",
                            e,
                        )
                    })
            })
            .await
    }

    // == Audience Stats ==
    pub async fn audience_stats(&self) -> Result<Cached<Vec<AudienceStats>>> {
        let api = self.api()?;

        self.cache
            .get_or_fetch(keys::AUDIENCE_STATS, || async move {
                api.list_audiences()
                    .await
                    .map(|audiences| {
                        audiences
                            .lists
                            .into_iter()
                            .map(AudienceStats::from)
                            .collect::<Vec<_>>()
                    })
                    .map_err(|e| {
                        GatewayError::from_upstream("Audience", "Failed to fetch audience stats", e)
                    })
            })
            .await
    }

    // == Subscribe ==
    /// Adds an email to the configured audience. Never touches the cache.
    pub async fn subscribe(&self, request: &SubscribeRequest) -> Result<SubscribeResponse> {
        let email = request.email()?;
        let api = self.api()?;
        let audience_id = self
            .settings
            .audience_id
            .as_deref()
            .ok_or_else(|| GatewayError::Config("MAILCHIMP_AUDIENCE_ID is not set".into()))?;

        let member = NewMember {
            email_address: email.clone(),
            status: self.settings.subscribe_status.clone(),
        };
        let ack = api
            .add_subscriber(audience_id, &member)
            .await
            .map_err(|e| GatewayError::from_upstream("Audience", "Failed to subscribe", e))?;

        info!(audience_id, "New newsletter subscription");
        Ok(SubscribeResponse::new(
            email,
            ack.status.unwrap_or(member.status),
        ))
    }

    // == Cache Management ==
    pub async fn clear_cache(&self, key: Option<&str>) {
        self.cache.clear(key).await;
    }

    pub async fn cache_info(&self) -> CacheInfo {
        self.cache.info().await
    }
}

fn campaign_id(id: &str) -> Result<&str> {
    let id = id.trim();
    if id.is_empty() {
        return Err(GatewayError::Validation("Campaign ID is required".into()));
    }
    if !keys::is_valid_campaign_id(id) {
        return Err(GatewayError::Validation(format!("Invalid campaign ID '{}'", id)));
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{shared, CacheStore};
    use crate::upstream::{
        CampaignListParams, RawAudience, RawAudienceList, RawCampaign, RawCampaignContent,
        RawCampaignList, RawCampaignSettings, RawMember, UpstreamError, UpstreamErrorKind,
        UpstreamResult,
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio_test::{assert_err, assert_ok};

    #[derive(Default)]
    struct FakeMailchimp {
        list_calls: AtomicUsize,
        campaign_calls: AtomicUsize,
        content_calls: AtomicUsize,
        audience_calls: AtomicUsize,
        subscribe_calls: AtomicUsize,
        last_list_params: Mutex<Option<CampaignListParams>>,
        fail_campaign: Option<UpstreamErrorKind>,
        subscribe_error: Option<UpstreamErrorKind>,
    }

    #[async_trait]
    impl MailchimpApi for FakeMailchimp {
        async fn list_campaigns(&self, params: &CampaignListParams) -> UpstreamResult<RawCampaignList> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_list_params.lock().unwrap() = Some(params.clone());
            let campaigns = (0..params.count)
                .map(|i| RawCampaign {
                    id: format!("c{}", i),
                    ..Default::default()
                })
                .collect();
            Ok(RawCampaignList {
                campaigns,
                total_items: None,
            })
        }

        async fn get_campaign(&self, campaign_id: &str) -> UpstreamResult<RawCampaign> {
            self.campaign_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(kind) = self.fail_campaign {
                return Err(UpstreamError::new(kind, Some(404), "failed"));
            }
            Ok(RawCampaign {
                id: campaign_id.to_string(),
                status: Some("sent".to_string()),
                settings: Some(RawCampaignSettings {
                    subject_line: Some(format!("Subject {}", campaign_id)),
                    ..Default::default()
                }),
                ..Default::default()
            })
        }

        async fn get_campaign_content(&self, campaign_id: &str) -> UpstreamResult<RawCampaignContent> {
            self.content_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawCampaignContent {
                html: Some(format!("<p>{}</p>", campaign_id)),
                plain_text: None,
            })
        }

        async fn list_audiences(&self) -> UpstreamResult<RawAudienceList> {
            self.audience_calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawAudienceList {
                lists: vec![RawAudience {
                    id: "aud1".to_string(),
                    ..Default::default()
                }],
            })
        }

        async fn add_subscriber(&self, _audience_id: &str, member: &NewMember) -> UpstreamResult<RawMember> {
            self.subscribe_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(kind) = self.subscribe_error {
                return Err(UpstreamError::new(kind, Some(400), "Member Exists"));
            }
            Ok(RawMember {
                status: Some(member.status.clone()),
                ..Default::default()
            })
        }
    }

    fn gateway_with(fake: Arc<FakeMailchimp>, audience_id: Option<&str>) -> MailchimpGateway {
        let settings = GatewaySettings {
            audience_id: audience_id.map(str::to_string),
            ..Default::default()
        };
        let api: Arc<dyn MailchimpApi> = fake;
        MailchimpGateway::new(Some(api), shared(CacheStore::new(300)), settings)
    }

    #[tokio::test]
    async fn test_campaign_cached_on_second_call() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        let first = assert_ok!(gateway.campaign("123").await);
        let second = assert_ok!(gateway.campaign("123").await);

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(first.value, second.value);
        assert_eq!(first.value.subject, "Subject 123");
        assert_eq!(fake.campaign_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_campaign_not_found_is_not_cached() {
        let fake = Arc::new(FakeMailchimp {
            fail_campaign: Some(UpstreamErrorKind::NotFound),
            ..Default::default()
        });
        let gateway = gateway_with(fake.clone(), None);

        let err = assert_err!(gateway.campaign("123").await);
        assert!(matches!(err, GatewayError::NotFound { .. }));
        assert!(gateway.cache().store().write().await.get("campaign_123").is_none());

        assert_err!(gateway.campaign("123").await);
        assert_eq!(fake.campaign_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_content_and_detail_cached_separately() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        assert_ok!(gateway.campaign("abc").await);
        let content = assert_ok!(gateway.campaign_content("abc").await);

        assert!(!content.cached);
        assert_eq!(content.value, "<p>abc</p>");
        assert_eq!(
            gateway.cache_info().await.keys,
            vec!["campaign_abc", "campaign_content_abc"]
        );
    }

    #[tokio::test]
    async fn test_blank_campaign_id_makes_no_upstream_call() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        let err = assert_err!(gateway.campaign_content("  ").await);
        assert!(matches!(err, GatewayError::Validation(_)));
        let err = assert_err!(gateway.campaign("a_b").await);
        assert!(matches!(err, GatewayError::Validation(_)));

        assert_eq!(fake.content_calls.load(Ordering::SeqCst), 0);
        assert_eq!(fake.campaign_calls.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.cache_info().await.stats.misses, 0);
    }

    #[tokio::test]
    async fn test_campaign_list_key_ignores_query() {
        // Known coarseness: the first query populates the list for everyone
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        let three = CampaignListQuery {
            count: Some("3".to_string()),
            ..Default::default()
        };
        let first = assert_ok!(gateway.campaigns(&three).await);
        assert_eq!(first.value.len(), 3);

        let second = assert_ok!(gateway.campaigns(&CampaignListQuery::default()).await);
        assert!(second.cached);
        assert_eq!(second.value.len(), 3);
        assert_eq!(fake.list_calls.load(Ordering::SeqCst), 1);

        gateway.clear_cache(Some(keys::CAMPAIGNS_LIST)).await;
        let third = assert_ok!(gateway.campaigns(&CampaignListQuery::default()).await);
        assert!(!third.cached);
        assert_eq!(third.value.len(), 5);
        assert_eq!(
            fake.last_list_params.lock().unwrap().clone(),
            Some(CampaignListParams::default())
        );
    }

    #[tokio::test]
    async fn test_audience_stats_cached() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        assert!(!assert_ok!(gateway.audience_stats().await).cached);
        let again = assert_ok!(gateway.audience_stats().await);
        assert!(again.cached);
        assert_eq!(again.value[0].id, "aud1");
        assert_eq!(fake.audience_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_subscribe_never_touches_cache() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), Some("aud1"));

        let request = SubscribeRequest {
            email: Some("a@b.com".to_string()),
        };
        let response = assert_ok!(gateway.subscribe(&request).await);

        assert_eq!(response.data.email, "a@b.com");
        assert_eq!(response.data.status, "subscribed");
        assert_eq!(fake.subscribe_calls.load(Ordering::SeqCst), 1);

        let info = gateway.cache_info().await;
        assert_eq!(info.count, 0);
        assert_eq!(info.stats.hits + info.stats.misses, 0);
    }

    #[tokio::test]
    async fn test_subscribe_requires_audience() {
        let fake = Arc::new(FakeMailchimp::default());
        let gateway = gateway_with(fake.clone(), None);

        let request = SubscribeRequest {
            email: Some("a@b.com".to_string()),
        };
        let err = assert_err!(gateway.subscribe(&request).await);
        assert!(matches!(err, GatewayError::Config(_)));
        assert_eq!(fake.subscribe_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_subscribe_member_exists() {
        let fake = Arc::new(FakeMailchimp {
            subscribe_error: Some(UpstreamErrorKind::MemberExists),
            ..Default::default()
        });
        let gateway = gateway_with(fake, Some("aud1"));

        let request = SubscribeRequest {
            email: Some("a@b.com".to_string()),
        };
        let err = assert_err!(gateway.subscribe(&request).await);
        assert!(matches!(err, GatewayError::MemberExists(_)));
    }

    #[tokio::test]
    async fn test_missing_credentials_fail_before_cache() {
        let store = shared(CacheStore::new(300));
        store
            .write()
            .await
            .set(keys::AUDIENCE_STATS, serde_json::json!([]), None);
        let gateway = MailchimpGateway::new(None, store, GatewaySettings::default());

        let err = assert_err!(gateway.audience_stats().await);
        assert!(matches!(err, GatewayError::Config(_)));
        // The cached entry was never consulted
        assert_eq!(gateway.cache_info().await.stats.hits, 0);
    }
}
