//! SheetKeeper Player - composition root binary.

use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sheetkeeper_player::application::api::Api;
use sheetkeeper_player::infrastructure::http_client::ApiAdapter;
use sheetkeeper_player::infrastructure::platform::create_platform;
use sheetkeeper_player::ports::outbound::{PlatformPort, RawApiPort};
use sheetkeeper_player::presentation::Services;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sheetkeeper_player=debug,dioxus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    #[cfg(target_arch = "wasm32")]
    {
        console_error_panic_hook::set_once();
        tracing_wasm::set_as_global_default();
    }

    tracing::info!("Starting SheetKeeper Player");

    // Platform
    let platform = create_platform();
    let user_id = platform.get_user_id();
    let api_base_url = platform.api_base_url();
    tracing::debug!(api_base_url = %api_base_url, "Engine API configured");

    // HTTP
    let raw_api: Arc<dyn RawApiPort> = Arc::new(ApiAdapter::new(api_base_url, user_id));
    let api = Api::new(raw_api);

    // Launch Dioxus
    #[allow(unused_mut)]
    let mut builder = dioxus::LaunchBuilder::new();

    #[cfg(not(target_arch = "wasm32"))]
    {
        let css = load_player_css();
        let head = format!("<style>{}</style>", css);
        let cfg = dioxus_desktop::Config::new().with_custom_head(head);
        builder = builder.with_cfg(cfg);
    }

    builder
        .with_context(platform)
        .with_context(Services::new(api))
        .launch(sheetkeeper_player::ui::app);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_player_css() -> String {
    const FALLBACK_CSS: &str = "";

    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    let css_path = repo_root.join("crates/player/assets/css/output.css");
    std::fs::read_to_string(css_path).unwrap_or_else(|_| FALLBACK_CSS.to_string())
}
