//! Proxy Module
//!
//! The caching policy in front of Mailchimp: key derivation, the
//! cache-or-fetch wrapper, and the per-route operations built on it.

mod cache;
pub mod keys;
mod service;

pub use cache::{Cached, ProxyCache};
pub use service::{GatewaySettings, MailchimpGateway};
