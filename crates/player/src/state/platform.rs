//! `Platform`: one provider per concern, chosen at startup by
//! `infrastructure::platform::create_platform` and read in components via
//! `use_platform()`.

use std::{future::Future, pin::Pin, sync::Arc};

use crate::ports::outbound::{
    storage_keys, DocumentProvider, EngineConfigProvider, PlatformPort, RandomProvider,
    SleepProvider, StorageProvider,
};

/// Suffix appended to every page title.
pub const APP_TITLE: &str = "SheetKeeper";

#[derive(Clone)]
pub struct Platform {
    sleep: Arc<dyn SleepProvider>,
    random: Arc<dyn RandomProvider>,
    storage: Arc<dyn StorageProvider>,
    document: Arc<dyn DocumentProvider>,
    engine_config: Arc<dyn EngineConfigProvider>,
}

impl Platform {
    pub fn new(
        sleep: impl SleepProvider,
        random: impl RandomProvider,
        storage: impl StorageProvider,
        document: impl DocumentProvider,
        engine_config: impl EngineConfigProvider,
    ) -> Self {
        Self {
            sleep: Arc::new(sleep),
            random: Arc::new(random),
            storage: Arc::new(storage),
            document: Arc::new(document),
            engine_config: Arc::new(engine_config),
        }
    }
}

impl PlatformPort for Platform {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        self.sleep.sleep_ms(ms)
    }

    fn random_range(&self, min: i32, max: i32) -> i32 {
        self.random.random_range(min, max)
    }

    fn storage_save(&self, key: &str, value: &str) {
        self.storage.save(key, value)
    }

    fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    fn storage_remove(&self, key: &str) {
        self.storage.remove(key)
    }

    fn get_user_id(&self) -> String {
        if let Some(existing) = self
            .storage_load(storage_keys::USER_ID)
            .filter(|id| !id.trim().is_empty())
        {
            return existing;
        }

        let new_id = format!("user-{}", uuid::Uuid::new_v4());
        tracing::info!(user_id = %new_id, "Created anonymous user id");
        self.storage_save(storage_keys::USER_ID, &new_id);
        new_id
    }

    fn set_page_title(&self, title: &str) {
        self.document.set_page_title(&format!("{title} - {APP_TITLE}"))
    }

    fn api_base_url(&self) -> String {
        self.engine_config.api_base_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::create_mock_platform;

    #[test]
    fn user_id_is_created_once_and_reused() {
        let platform = create_mock_platform();
        let first = platform.get_user_id();
        assert!(first.starts_with("user-"));
        assert_eq!(platform.get_user_id(), first);
        assert_eq!(
            platform.storage_load(storage_keys::USER_ID).as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn cleared_storage_gives_a_new_identity() {
        let platform = create_mock_platform();
        let first = platform.get_user_id();
        platform.storage_remove(storage_keys::USER_ID);
        assert_ne!(platform.get_user_id(), first);
    }
}
