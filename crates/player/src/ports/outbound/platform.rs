//! Per-platform providers behind the [`PlatformPort`](super::PlatformPort).
//!
//! Desktop and wasm each implement these; `state::Platform` bundles one of each.
//! They are object safe so the bundle can hold them as `Arc<dyn ...>`.

use std::{future::Future, pin::Pin};

pub trait SleepProvider: Send + Sync + 'static {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>>;
}

pub trait RandomProvider: Send + Sync + 'static {
    /// Uniform integer in `min..=max`; `min` when the range is empty.
    fn random_range(&self, min: i32, max: i32) -> i32;
}

/// Small string key-value store that survives restarts
/// (localStorage in the browser, a JSON file on desktop).
pub trait StorageProvider: Send + Sync + 'static {
    fn save(&self, key: &str, value: &str);
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str);
}

pub trait DocumentProvider: Send + Sync + 'static {
    /// Shows `title` as the browser tab or window title.
    fn set_page_title(&self, title: &str);
}

/// Where the Engine is reached, and where share links open.
pub trait EngineConfigProvider: Send + Sync + 'static {
    /// Base URL of the Engine REST API, without a trailing slash.
    fn api_base_url(&self) -> String;
}

pub mod storage_keys {
    pub const USER_ID: &str = "sheetkeeper_user_id";
}
