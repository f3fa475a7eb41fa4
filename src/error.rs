//! Error types for the gateway
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::models::ErrorResponse;
use crate::upstream::{UpstreamError, UpstreamErrorKind};
use thiserror::Error;

// == Gateway Error Enum ==
/// Unified error type for the gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Required Mailchimp settings are missing
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing or invalid caller input
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Mailchimp reported the resource does not exist
    #[error("{resource} not found: {source}")]
    NotFound {
        resource: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// Mailchimp reported the subscriber is already on the audience
    #[error("Member already exists: {0}")]
    MemberExists(#[source] UpstreamError),

    /// Any other Mailchimp failure, including malformed payloads
    #[error("{action}: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: UpstreamError,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// Classifies an upstream failure for the operation that produced it.
    ///
    /// # Arguments
    /// * `resource` - What was requested, used in the not-found message
    /// * `action` - Public message used when the failure is not a not-found
    pub fn from_upstream(resource: &'static str, action: &'static str, err: UpstreamError) -> Self {
        match err.kind {
            UpstreamErrorKind::NotFound => GatewayError::NotFound {
                resource,
                source: err,
            },
            UpstreamErrorKind::MemberExists => GatewayError::MemberExists(err),
            UpstreamErrorKind::Malformed | UpstreamErrorKind::Other => GatewayError::Upstream {
                action,
                source: err,
            },
        }
    }

    // == Status Code ==
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::MemberExists(_) => StatusCode::BAD_REQUEST,
            GatewayError::NotFound { .. } => StatusCode::NOT_FOUND,
            GatewayError::Config(_) | GatewayError::Upstream { .. } | GatewayError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    // == Public Message ==
    /// Message safe to return to any caller.
    pub fn public_message(&self) -> String {
        match self {
            GatewayError::Config(_) => "Server is not configured for this operation".to_string(),
            GatewayError::Validation(msg) => msg.clone(),
            GatewayError::NotFound { resource, .. } => format!("{} not found", resource),
            GatewayError::MemberExists(_) => "This email is already subscribed".to_string(),
            GatewayError::Upstream { action, .. } => action.to_string(),
            GatewayError::Internal(_) => "Internal server error".to_string(),
        }
    }

    // == Details ==
    /// Underlying cause, returned only when details are enabled.
    pub fn details(&self) -> Option<String> {
        match self {
            GatewayError::Validation(_) => None,
            GatewayError::Config(msg) | GatewayError::Internal(msg) => Some(msg.clone()),
            GatewayError::NotFound { source, .. }
            | GatewayError::MemberExists(source)
            | GatewayError::Upstream { source, .. } => Some(source.to_string()),
        }
    }

    /// Pairs the error with the detail setting so it can be rendered.
    pub fn with_details(self, expose_details: bool) -> ApiError {
        ApiError {
            error: self,
            expose_details,
        }
    }
}

// == API Error ==
/// A gateway error ready to be rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    pub error: GatewayError,
    pub expose_details: bool,
}

impl From<GatewayError> for ApiError {
    fn from(error: GatewayError) -> Self {
        error.with_details(false)
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        if status.is_server_error() {
            error!(error = %self.error, "Request failed");
        } else {
            warn!(error = %self.error, "Request rejected");
        }

        let details = if self.expose_details {
            self.error.details()
        } else {
            None
        };
        let body = ErrorResponse::new(self.error.public_message(), details);

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the gateway.
pub type Result<T> = std::result::Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_error_status_codes() {
        let test_cases = vec![
            (GatewayError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (GatewayError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                GatewayError::from_upstream("Campaign", "Failed", UpstreamError::not_found("gone")),
                StatusCode::NOT_FOUND,
            ),
            (
                GatewayError::MemberExists(UpstreamError::new(
                    UpstreamErrorKind::MemberExists,
                    Some(400),
                    "exists",
                )),
                StatusCode::BAD_REQUEST,
            ),
            (
                GatewayError::from_upstream("Campaign", "Failed", UpstreamError::malformed("bad")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (GatewayError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected_status) in test_cases {
            assert_eq!(error.status_code(), expected_status, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_details_hidden_by_default() {
        let err = GatewayError::from_upstream(
            "Campaign",
            "Failed to fetch campaign",
            UpstreamError::other(Some(500), "secret upstream message"),
        );
        let (status, body) = render(err.into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Failed to fetch campaign");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_details_exposed_when_enabled() {
        let err = GatewayError::from_upstream(
            "Campaign",
            "Failed to fetch campaign",
            UpstreamError::not_found("no such campaign"),
        );
        let (status, body) = render(err.with_details(true)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Campaign not found");
        assert!(body["details"].as_str().unwrap().contains("no such campaign"));
    }

    #[tokio::test]
    async fn test_validation_message_always_public() {
        let (status, body) = render(GatewayError::Validation("Email is required".into()).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email is required");
    }
}
