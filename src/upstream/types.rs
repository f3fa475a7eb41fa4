//! Raw Mailchimp payloads
//!
//! Only the fields the gateway reads are modeled. Collections that a response
//! must carry (`campaigns`, `lists`) are required so a truncated payload fails
//! to decode; everything nested is optional and defaulted during shaping.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /campaigns`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CampaignListParams {
    pub count: u32,
    pub status: String,
    pub sort_field: String,
    pub sort_dir: String,
}

impl Default for CampaignListParams {
    fn default() -> Self {
        Self {
            count: 5,
            status: "sent".to_string(),
            sort_field: "send_time".to_string(),
            sort_dir: "DESC".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawCampaignList {
    pub campaigns: Vec<RawCampaign>,
    #[serde(default)]
    pub total_items: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCampaign {
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub emails_sent: Option<u64>,
    #[serde(default)]
    pub send_time: Option<String>,
    #[serde(default)]
    pub create_time: Option<String>,
    #[serde(default)]
    pub archive_url: Option<String>,
    #[serde(default)]
    pub settings: Option<RawCampaignSettings>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCampaignSettings {
    #[serde(default)]
    pub subject_line: Option<String>,
    #[serde(default)]
    pub preview_text: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub from_name: Option<String>,
    #[serde(default)]
    pub reply_to: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCampaignContent {
    #[serde(default)]
    pub html: Option<String>,
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawAudienceList {
    pub lists: Vec<RawAudience>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAudience {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub stats: Option<RawAudienceStats>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAudienceStats {
    #[serde(default)]
    pub member_count: Option<u64>,
    #[serde(default)]
    pub total_contacts: Option<u64>,
    #[serde(default)]
    pub unsubscribe_count: Option<u64>,
}

/// Body of `POST /lists/{list_id}/members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMember {
    pub email_address: String,
    pub status: String,
}

/// Member record echoed back by Mailchimp after a subscription.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMember {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email_address: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// RFC 7807 problem document returned on upstream failures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProblemDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_list_requires_campaigns() {
        let result: Result<RawCampaignList, _> = serde_json::from_str(r#"{"total_items": 3}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_campaign_tolerates_missing_nested_fields() {
        let campaign: RawCampaign = serde_json::from_str(r#"{"id": "c1"}"#).unwrap();
        assert_eq!(campaign.id, "c1");
        assert!(campaign.settings.is_none());
        assert!(campaign.send_time.is_none());
    }

    #[test]
    fn test_campaign_type_field() {
        let campaign: RawCampaign =
            serde_json::from_str(r#"{"id": "c1", "type": "regular", "emails_sent": 12}"#).unwrap();
        assert_eq!(campaign.kind.as_deref(), Some("regular"));
        assert_eq!(campaign.emails_sent, Some(12));
    }

    #[test]
    fn test_audience_list_requires_lists() {
        let result: Result<RawAudienceList, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_member_serialize() {
        let member = NewMember {
            email_address: "a@b.com".to_string(),
            status: "subscribed".to_string(),
        };
        let json = serde_json::to_value(&member).unwrap();
        assert_eq!(json["email_address"], "a@b.com");
        assert_eq!(json["status"], "subscribed");
    }

    #[test]
    fn test_default_list_params() {
        let params = CampaignListParams::default();
        assert_eq!(params.count, 5);
        assert_eq!(params.status, "sent");
        assert_eq!(params.sort_field, "send_time");
        assert_eq!(params.sort_dir, "DESC");
    }
}
