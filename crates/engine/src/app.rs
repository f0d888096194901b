//! Application state and composition.

use std::sync::Arc;

use sheetkeeper_domain::ExporterRegistry;

use crate::infrastructure::{
    clock::{SystemClock, SystemRandom},
    ports::{AuditLogRepo, CharacterRepo, ClockPort, RandomPort},
};
use crate::use_cases;

const DEFAULT_STORAGE_BASE_URL: &str = "https://storage.example.com";
const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "sheetkeeper.db";

/// Settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `SERVER_HOST`
    pub host: String,
    /// `SERVER_PORT`, falling back to `PORT`.
    pub port: u16,
    /// `DATABASE_PATH`, the SQLite file.
    pub database_path: String,
    /// `CORS_ALLOWED_ORIGINS`: `*` or a comma-separated list. Unset disables CORS.
    pub cors_allowed_origins: Option<String>,
    /// Prefix of upload and public image URLs.
    pub storage_base_url: String,
    /// Origin the Player is served from; share links point here.
    pub public_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let port = var("SERVER_PORT")
            .or_else(|| var("PORT"))
            .and_then(|p| match p.parse() {
                Ok(port) => Some(port),
                Err(_) => {
                    tracing::warn!(value = %p, "Ignoring invalid port");
                    None
                }
            })
            .unwrap_or(DEFAULT_PORT);

        Self {
            host: var("SERVER_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_path: var("DATABASE_PATH")
                .unwrap_or_else(|| DEFAULT_DATABASE_PATH.to_string()),
            cors_allowed_origins: var("CORS_ALLOWED_ORIGINS"),
            storage_base_url: var("STORAGE_BASE_URL")
                .unwrap_or_else(|| DEFAULT_STORAGE_BASE_URL.to_string()),
            public_base_url: var("PUBLIC_BASE_URL")
                .unwrap_or_else(|| DEFAULT_PUBLIC_BASE_URL.to_string()),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Main application state.
///
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub audit: Arc<dyn AuditLogRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub characters: use_cases::CharacterUseCases,
    pub dice: use_cases::DiceUseCases,
    pub export: use_cases::ExportUseCases,
    pub images: use_cases::ImageUseCases,
}

impl App {
    /// Create a new App with the system clock and randomness.
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        audit_repo: Arc<dyn AuditLogRepo>,
        config: AppConfig,
    ) -> Self {
        Self::with_ports(
            character_repo,
            audit_repo,
            Arc::new(SystemClock),
            Arc::new(SystemRandom),
            config,
        )
    }

    pub fn with_ports(
        character_repo: Arc<dyn CharacterRepo>,
        audit_repo: Arc<dyn AuditLogRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        config: AppConfig,
    ) -> Self {
        let use_cases = UseCases {
            characters: use_cases::CharacterUseCases::new(
                character_repo.clone(),
                audit_repo.clone(),
                clock.clone(),
                random.clone(),
            ),
            dice: use_cases::DiceUseCases::new(character_repo.clone(), random.clone()),
            export: use_cases::ExportUseCases::new(
                character_repo.clone(),
                ExporterRegistry::with_builtin(),
                config.public_base_url.clone(),
            ),
            images: use_cases::ImageUseCases::new(
                character_repo.clone(),
                clock,
                random,
                config.storage_base_url.clone(),
            ),
        };

        Self {
            repositories: Repositories {
                character: character_repo,
                audit: audit_repo,
            },
            use_cases,
        }
    }
}
