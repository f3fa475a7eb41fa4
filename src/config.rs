//! Configuration Module
//!
//! Handles loading and managing gateway configuration from environment variables.

use std::env;

use crate::cache::DEFAULT_TTL_SECONDS;

/// Gateway configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Missing Mailchimp credentials do not prevent startup; the affected routes
/// report a configuration error instead.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for cached upstream responses
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Timeout in seconds for each upstream request
    pub upstream_timeout: u64,
    /// Mailchimp API key (`<key>-<dc>`)
    pub mailchimp_api_key: Option<String>,
    /// Mailchimp data-center prefix, e.g. `us21`
    pub mailchimp_server_prefix: Option<String>,
    /// Audience that newsletter subscriptions are added to
    pub mailchimp_audience_id: Option<String>,
    /// Add new subscribers as `pending` so Mailchimp sends a confirmation email
    pub double_opt_in: bool,
    /// Include upstream error details in failure responses
    pub expose_error_details: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Cache TTL in seconds (default: 600)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `UPSTREAM_TIMEOUT` - Upstream request timeout in seconds (default: 10)
    /// - `MAILCHIMP_API_KEY` - API key (no default)
    /// - `MAILCHIMP_SERVER_PREFIX` - Data center (default: derived from the API key)
    /// - `MAILCHIMP_AUDIENCE_ID` - Subscription audience (no default)
    /// - `MAILCHIMP_DOUBLE_OPT_IN` - `true` to subscribe as pending (default: false)
    /// - `EXPOSE_ERROR_DETAILS` - `true` to return error details (default: false)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            upstream_timeout: parse_var("UPSTREAM_TIMEOUT").unwrap_or(defaults.upstream_timeout),
            mailchimp_api_key: string_var("MAILCHIMP_API_KEY"),
            mailchimp_server_prefix: string_var("MAILCHIMP_SERVER_PREFIX"),
            mailchimp_audience_id: string_var("MAILCHIMP_AUDIENCE_ID"),
            double_opt_in: bool_var("MAILCHIMP_DOUBLE_OPT_IN"),
            expose_error_details: bool_var("EXPOSE_ERROR_DETAILS"),
        }
    }

    /// Data-center prefix for the API host.
    ///
    /// Uses `MAILCHIMP_SERVER_PREFIX` when set, otherwise the suffix after the
    /// last `-` in the API key.
    pub fn server_prefix(&self) -> Option<String> {
        if let Some(prefix) = &self.mailchimp_server_prefix {
            return Some(prefix.clone());
        }
        self.mailchimp_api_key
            .as_deref()
            .and_then(|key| key.rsplit_once('-'))
            .map(|(_, dc)| dc.to_string())
            .filter(|dc| !dc.is_empty())
    }

    /// Status new members are created with.
    pub fn subscribe_status(&self) -> &'static str {
        if self.double_opt_in {
            "pending"
        } else {
            "subscribed"
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_TTL_SECONDS,
            cleanup_interval: 60,
            upstream_timeout: 10,
            mailchimp_api_key: None,
            mailchimp_server_prefix: None,
            mailchimp_audience_id: None,
            double_opt_in: false,
            expose_error_details: false,
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

fn string_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn bool_var(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}
