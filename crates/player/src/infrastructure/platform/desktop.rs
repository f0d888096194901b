//! Desktop providers: tokio timers, a JSON file for storage, env-var configuration.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use std::{future::Future, pin::Pin};

use directories::ProjectDirs;
use rand::Rng;

use crate::ports::outbound::platform::{
    DocumentProvider, EngineConfigProvider, RandomProvider, SleepProvider, StorageProvider,
};
use crate::state::Platform;

/// Default Engine address for desktop builds.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Clone, Default)]
pub struct DesktopRandomProvider;

impl RandomProvider for DesktopRandomProvider {
    fn random_range(&self, min: i32, max: i32) -> i32 {
        if max <= min {
            min
        } else {
            rand::thread_rng().gen_range(min..=max)
        }
    }
}

/// Key-value store backed by one JSON file in the platform config directory
/// (e.g. `~/.config/sheetkeeper/player/storage.json` on Linux).
///
/// Reads are served from memory; every write rewrites the file.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    path: PathBuf,
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Default for DesktopStorageProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn read_entries(path: &Path) -> Result<HashMap<String, String>, String> {
    match fs::read_to_string(path) {
        Ok(text) => serde_json::from_str(&text).map_err(|e| e.to_string()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
        Err(e) => Err(e.to_string()),
    }
}

fn write_entries(path: &Path, entries: &HashMap<String, String>) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| e.to_string())?;
    }
    let text = serde_json::to_string_pretty(entries).map_err(|e| e.to_string())?;
    fs::write(path, text).map_err(|e| e.to_string())
}

impl DesktopStorageProvider {
    pub fn new() -> Self {
        let path = ProjectDirs::from("io", "sheetkeeper", "player")
            .map(|dirs| dirs.config_dir().join("storage.json"))
            .unwrap_or_else(|| PathBuf::from("sheetkeeper_storage.json"));
        Self::at(path)
    }

    /// Uses an explicit storage file. A missing or unreadable file starts empty.
    pub fn at(path: PathBuf) -> Self {
        let entries = read_entries(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable player storage");
            HashMap::new()
        });
        tracing::debug!(path = %path.display(), keys = entries.len(), "Player storage loaded");
        Self {
            path,
            entries: Arc::new(RwLock::new(entries)),
        }
    }

    fn update(&self, change: impl FnOnce(&mut HashMap<String, String>)) {
        let snapshot = match self.entries.write() {
            Ok(mut guard) => {
                change(&mut guard);
                guard.clone()
            }
            Err(e) => {
                tracing::error!(error = %e, "Player storage lock poisoned");
                return;
            }
        };
        if let Err(e) = write_entries(&self.path, &snapshot) {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to write player storage");
        }
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string());
        });
    }

    fn load(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn remove(&self, key: &str) {
        self.update(|entries| {
            entries.remove(key);
        });
    }
}

/// Page titles become the desktop window title.
#[derive(Clone, Default)]
pub struct DesktopDocumentProvider;

impl DocumentProvider for DesktopDocumentProvider {
    fn set_page_title(&self, title: &str) {
        dioxus_desktop::window().set_title(title);
    }
}

#[derive(Clone, Default)]
pub struct DesktopSleepProvider;

impl SleepProvider for DesktopSleepProvider {
    fn sleep_ms(&self, ms: u64) -> Pin<Box<dyn Future<Output = ()> + 'static>> {
        Box::pin(async move {
            tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
        })
    }
}

/// Engine address from `SHEETKEEPER_API_URL`
#[derive(Clone)]
pub struct DesktopEngineConfigProvider {
    api_base_url: String,
}

impl DesktopEngineConfigProvider {
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("SHEETKEEPER_API_URL")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        Self::new(api_base_url)
    }

    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl EngineConfigProvider for DesktopEngineConfigProvider {
    fn api_base_url(&self) -> String {
        self.api_base_url.clone()
    }
}

/// Create platform services for desktop
pub fn create_platform() -> Platform {
    Platform::new(
        DesktopSleepProvider,
        DesktopRandomProvider,
        DesktopStorageProvider::new(),
        DesktopDocumentProvider,
        DesktopEngineConfigProvider::from_env(),
    )
}
