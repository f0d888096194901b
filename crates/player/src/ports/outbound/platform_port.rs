//! What the UI needs from the host: timers, dice, storage, identity, the page
//! title and the Engine address.

use std::{future::Future, pin::Pin};

/// Implemented by `state::Platform`; components get it from `use_platform()`.
pub trait PlatformPort: Send + Sync {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;

    /// Generate random i32 in range [min, max] (inclusive)
    fn random_range(&self, min: i32, max: i32) -> i32;

    fn storage_save(&self, key: &str, value: &str);

    fn storage_load(&self, key: &str) -> Option<String>;

    fn storage_remove(&self, key: &str);

    /// Get or create a stable anonymous user ID
    ///
    /// The ID is persisted in storage and reused across sessions until the
    /// storage is cleared. It is sent as `X-User-Id` on every Engine request.
    fn get_user_id(&self) -> String;

    /// Sets the tab or window title; the app name is appended.
    fn set_page_title(&self, title: &str);

    /// Base URL of the Engine REST API
    fn api_base_url(&self) -> String;
}
