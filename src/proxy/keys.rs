//! Cache key derivation for the proxied read routes.
//!
//! The campaign list key ignores the query parameters: whichever
//! parameters populate it first are served until it expires or is cleared.
//!
//! Per-campaign keys embed the id verbatim. Ids must satisfy
//! [`is_valid_campaign_id`] (no `_`), which keeps `campaign_<id>` and
//! `campaign_content_<id>` from ever colliding.

/// Key for `GET /api/campaigns`, whatever its query parameters.
pub const CAMPAIGNS_LIST: &str = "mailchimp_campaigns";

/// Key for `GET /api/audience/stats`.
pub const AUDIENCE_STATS: &str = "audience_stats";

/// Mailchimp campaign ids are short alphanumeric strings; `-` is tolerated.
pub fn is_valid_campaign_id(id: &str) -> bool {
    !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Key for `GET /api/campaigns/:id`.
pub fn campaign(id: &str) -> String {
    format!("campaign_{}", id)
}

/// Key for `GET /api/campaigns/:id/content`.
pub fn campaign_content(id: &str) -> String {
    format!("campaign_content_{}", id)
}
