//! SheetKeeper Engine - Main entry point.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetkeeper_engine::infrastructure::persistence::{
    self, SqliteAuditLogRepo, SqliteCharacterRepo,
};
use sheetkeeper_engine::{api, App, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // The engine may be started from `crates/engine`, so .env files are looked up
    // at the repo root.
    load_dotenv_from_repo_root();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetkeeper_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting SheetKeeper Engine");

    let config = AppConfig::from_env();

    tracing::info!(path = %config.database_path, "Opening SQLite database");
    let pool = persistence::connect(&config.database_path).await?;

    let addr: SocketAddr = config.bind_addr().parse()?;
    let cors = config.cors_allowed_origins.as_deref().and_then(cors_layer);

    let app = Arc::new(App::new(
        Arc::new(SqliteCharacterRepo::new(pool.clone())),
        Arc::new(SqliteAuditLogRepo::new(pool)),
        config,
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());
    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    tracing::info!(%addr, "Listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

/// `*` allows any origin; otherwise a comma-separated allow-list.
fn cors_layer(allowed_origins: &str) -> Option<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        // X-User-Id and JSON bodies trigger preflights.
        .allow_headers([
            HeaderName::from_static(sheetkeeper_shared::USER_ID_HEADER),
            axum::http::header::CONTENT_TYPE,
        ]);

    if allowed_origins == "*" {
        return Some(cors.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| match HeaderValue::from_str(s) {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!(origin = s, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    (!origins.is_empty()).then(|| cors.allow_origin(origins))
}
