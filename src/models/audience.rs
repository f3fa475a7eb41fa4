//! Public audience statistics shape

use serde::{Deserialize, Serialize};

use crate::upstream::RawAudience;

/// One row of `GET /api/audience/stats`.
///
/// `memberCount` is every contact on the audience (falling back to the
/// subscribed count when Mailchimp omits the total).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudienceStats {
    pub id: String,
    pub name: String,
    pub member_count: u64,
    pub subscribed_count: u64,
    pub unsubscribed_count: u64,
    pub date_created: Option<String>,
}

impl From<RawAudience> for AudienceStats {
    fn from(raw: RawAudience) -> Self {
        let stats = raw.stats.unwrap_or_default();
        let subscribed = stats.member_count.unwrap_or(0);
        Self {
            id: raw.id,
            name: raw.name.unwrap_or_default(),
            member_count: stats.total_contacts.unwrap_or(subscribed),
            subscribed_count: subscribed,
            unsubscribed_count: stats.unsubscribe_count.unwrap_or(0),
            date_created: raw.date_created,
        }
    }
}
