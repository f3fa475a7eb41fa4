//! Response DTOs for the gateway API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;

/// Envelope for every proxied read route.
///
/// `cached` tells the caller whether `data` came from the cache (`true`) or
/// from a fresh upstream fetch (`false`).
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub cached: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, cached: bool) -> Self {
        Self {
            success: true,
            data,
            cached,
        }
    }
}

/// Response body for `POST /api/newsletter/subscribe`
#[derive(Debug, Clone, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub data: SubscribedMember,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscribedMember {
    pub email: String,
    pub status: String,
}

impl SubscribeResponse {
    pub fn new(email: impl Into<String>, status: impl Into<String>) -> Self {
        let status = status.into();
        let message = if status == "pending" {
            "Please check your inbox to confirm your subscription".to_string()
        } else {
            "Successfully subscribed to the newsletter".to_string()
        };
        Self {
            success: true,
            message,
            data: SubscribedMember {
                email: email.into(),
                status,
            },
        }
    }
}

/// Response body for `POST /api/cache/clear`
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub success: bool,
    pub message: String,
}

impl ClearCacheResponse {
    /// Message for a single-key or full clear.
    pub fn new(key: Option<&str>) -> Self {
        let message = match key {
            Some(key) => format!("Cache key '{}' cleared", key),
            None => "All cache cleared".to_string(),
        };
        Self {
            success: true,
            message,
        }
    }
}

/// Snapshot returned by `GET /api/cache/info`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheInfo {
    /// Live keys, ascending
    pub keys: Vec<String>,
    pub stats: CacheStats,
    /// Number of live keys
    pub count: usize,
}

/// Response body for `GET /api/cache/info`
#[derive(Debug, Clone, Serialize)]
pub struct CacheInfoResponse {
    pub success: bool,
    pub data: CacheInfo,
}

impl CacheInfoResponse {
    pub fn new(data: CacheInfo) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all failure conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Message describing what went wrong
    pub error: String,
    /// Underlying cause, present only when error details are enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_api_response_envelope() {
        let resp = ApiResponse::new("<p>hi</p>", true);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json, json!({"success": true, "data": "<p>hi</p>", "cached": true}));
    }

    #[test]
    fn test_subscribe_response_messages() {
        let resp = SubscribeResponse::new("a@b.com", "subscribed");
        assert!(resp.message.contains("Successfully"));
        assert_eq!(resp.data.email, "a@b.com");

        let resp = SubscribeResponse::new("a@b.com", "pending");
        assert!(resp.message.contains("confirm"));
    }

    #[test]
    fn test_clear_response_messages() {
        assert_eq!(
            ClearCacheResponse::new(Some("campaign_1")).message,
            "Cache key 'campaign_1' cleared"
        );
        assert_eq!(ClearCacheResponse::new(None).message, "All cache cleared");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_omits_empty_details() {
        let json = serde_json::to_value(ErrorResponse::new("Something went wrong", None)).unwrap();
        assert_eq!(json, json!({"success": false, "error": "Something went wrong"}));
    }
}
