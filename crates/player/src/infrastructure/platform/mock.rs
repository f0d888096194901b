//! In-memory platform for tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::{future::Future, pin::Pin};

use crate::ports::outbound::platform::{
    DocumentProvider, EngineConfigProvider, RandomProvider, SleepProvider, StorageProvider,
};
use crate::state::Platform;

#[derive(Clone, Default)]
pub struct MockStorageProvider {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl StorageProvider for MockStorageProvider {
    fn save(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok().and_then(|v| v.get(key).cloned())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.remove(key);
        }
    }
}

/// Always returns the low end of the range.
#[derive(Clone, Default)]
pub struct MockRandomProvider;

impl RandomProvider for MockRandomProvider {
    fn random_range(&self, min: i32, _max: i32) -> i32 {
        min
    }
}

#[derive(Clone, Default)]
pub struct MockSleepProvider;

impl SleepProvider for MockSleepProvider {
    fn sleep_ms(&self, _ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async {})
    }
}

#[derive(Clone, Default)]
pub struct MockDocumentProvider;

impl DocumentProvider for MockDocumentProvider {
    fn set_page_title(&self, _title: &str) {}
}

#[derive(Clone, Default)]
pub struct MockEngineConfigProvider;

impl EngineConfigProvider for MockEngineConfigProvider {
    fn api_base_url(&self) -> String {
        "http://engine.test".to_string()
    }
}

pub fn create_mock_platform() -> Platform {
    Platform::new(
        MockSleepProvider,
        MockRandomProvider,
        MockStorageProvider::default(),
        MockDocumentProvider,
        MockEngineConfigProvider,
    )
}
