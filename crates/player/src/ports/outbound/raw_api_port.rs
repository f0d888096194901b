//! Raw API Port - Object-safe HTTP boundary
//!
//! `ApiPort` is generic over response/request types which makes it not
//! object-safe. `RawApiPort` is the boundary implemented by adapters and stored
//! behind `Arc<dyn ...>`; the application layer provides the typed wrapper.

use serde_json::Value;

use super::ApiError;

#[cfg_attr(test, mockall::automock)]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn put_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;

    async fn delete(&self, path: &str) -> Result<(), ApiError>;
}
