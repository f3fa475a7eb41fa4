//! Public campaign shapes
//!
//! Total transforms from raw Mailchimp campaigns. Missing strings become `""`,
//! missing counts `0`, missing timestamps and URLs `null`.

use serde::{Deserialize, Serialize};

use crate::upstream::{RawCampaign, RawCampaignContent, RawCampaignSettings, UpstreamError};

/// One row of `GET /api/campaigns`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSummary {
    pub id: String,
    pub subject: String,
    pub preview_text: String,
    pub send_time: Option<String>,
    pub status: String,
    pub emails_sent: u64,
    pub archive_url: Option<String>,
}

/// Body of `GET /api/campaigns/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDetail {
    pub id: String,
    pub subject: String,
    pub send_time: Option<String>,
    pub status: String,
    pub emails_sent: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub create_time: Option<String>,
    pub settings: CampaignSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignSettings {
    pub from_name: String,
    pub reply_to: String,
    pub title: String,
}

impl From<RawCampaign> for CampaignSummary {
    fn from(raw: RawCampaign) -> Self {
        let settings = raw.settings.unwrap_or_default();
        Self {
            id: raw.id,
            subject: settings.subject_line.unwrap_or_default(),
            preview_text: settings.preview_text.unwrap_or_default(),
            send_time: raw.send_time,
            status: raw.status.unwrap_or_default(),
            emails_sent: raw.emails_sent.unwrap_or(0),
            archive_url: raw.archive_url,
        }
    }
}

impl From<RawCampaign> for CampaignDetail {
    fn from(raw: RawCampaign) -> Self {
        let RawCampaignSettings {
            subject_line,
            title,
            from_name,
            reply_to,
            ..
        } = raw.settings.unwrap_or_default();

        Self {
            id: raw.id,
            subject: subject_line.unwrap_or_default(),
            send_time: raw.send_time,
            status: raw.status.unwrap_or_default(),
            emails_sent: raw.emails_sent.unwrap_or(0),
            kind: raw.kind.unwrap_or_default(),
            create_time: raw.create_time,
            settings: CampaignSettings {
                from_name: from_name.unwrap_or_default(),
                reply_to: reply_to.unwrap_or_default(),
                title: title.unwrap_or_default(),
            },
        }
    }
}

/// Extracts the rendered HTML. A content payload without `html` is malformed.
pub fn campaign_html(content: RawCampaignContent) -> Result<String, UpstreamError> {
    content
        .html
        .ok_or_else(|| UpstreamError::malformed("Campaign content has no html field"))
}
