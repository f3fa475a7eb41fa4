//! Mailchimp Proxy - A caching gateway in front of the Mailchimp Marketing API
//!
//! Re-exposes campaign, audience and subscription operations under simple
//! routes, serving reads from a time-expiring in-memory cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod proxy;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{GatewayError, Result};
pub use proxy::{Cached, MailchimpGateway, ProxyCache};
pub use tasks::spawn_cleanup_task;
