//! WASM platform implementations
//!
//! Browser-backed providers: localStorage, document title, page origin.

use crate::ports::outbound::platform::{
    DocumentProvider, EngineConfigProvider, RandomProvider, SleepProvider, StorageProvider,
};
use crate::state::Platform;
use std::{future::Future, pin::Pin};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// WASM random provider using the browser crypto source
#[derive(Clone, Default)]
pub struct WasmRandomProvider;

impl RandomProvider for WasmRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        let mut bytes = [0u8; 4];
        if let Err(e) = getrandom::getrandom(&mut bytes) {
            tracing::error!("Failed to read random bytes: {}", e);
            return min;
        }
        let span = (max as i64 - min as i64 + 1) as u64;
        let offset = u64::from(u32::from_le_bytes(bytes)) % span;
        (min as i64 + offset as i64) as i32
    }
}

/// WASM storage provider using localStorage
#[derive(Clone, Default)]
pub struct WasmStorageProvider;

impl StorageProvider for WasmStorageProvider {
    fn save(&self, key: &str, value: &str) {
        if let Some(storage) = local_storage() {
            if storage.set_item(key, value).is_err() {
                tracing::error!("Failed to write localStorage key {}", key);
            }
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        local_storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}

/// WASM document provider
#[derive(Clone, Default)]
pub struct WasmDocumentProvider;

impl DocumentProvider for WasmDocumentProvider {
    fn set_page_title(&self, title: &str) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            document.set_title(title);
        }
    }
}

/// WASM sleep provider using gloo timers
#[derive(Clone, Default)]
pub struct WasmSleepProvider;

impl SleepProvider for WasmSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        let ms = u32::try_from(ms).unwrap_or(u32::MAX);
        Box::pin(gloo_timers::future::TimeoutFuture::new(ms))
    }
}

/// The Engine is served from the page origin
#[derive(Clone, Default)]
pub struct WasmEngineConfigProvider;

impl EngineConfigProvider for WasmEngineConfigProvider {
    fn api_base_url(&self) -> String {
        web_sys::window()
            .and_then(|w| w.location().origin().ok())
            .unwrap_or_default()
    }
}

/// Create platform services for the browser
pub fn create_platform() -> Platform {
    Platform::new(
        WasmSleepProvider,
        WasmRandomProvider,
        WasmStorageProvider,
        WasmDocumentProvider,
        WasmEngineConfigProvider,
    )
}
