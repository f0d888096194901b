//! API layer - HTTP entry points.

pub mod auth;
pub mod http;

pub use auth::CurrentUser;
pub use http::ApiError;
