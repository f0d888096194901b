//! Infrastructure adapters: HTTP client and platform providers.

pub mod http_client;
pub mod platform;
