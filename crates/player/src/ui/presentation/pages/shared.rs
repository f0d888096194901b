//! Read-only page for a public character reached through its share link

use dioxus::prelude::*;
use sheetkeeper_shared::CharacterResponse;

use crate::ports::outbound::PlatformPort;
use crate::ui::use_platform;
use crate::ui::presentation::components::{LoadingSpinner, TagList};
use crate::ui::presentation::services::use_character_service;
use crate::ui::presentation::views::SheetView;

const INVALID_LINK_MESSAGE: &str = "このリンクは無効か、キャラクターが非公開になっています。";

#[component]
pub fn SharedPage(token: String) -> Element {
    let character_service = use_character_service();
    let platform = use_platform();

    let mut character: Signal<Option<CharacterResponse>> = use_signal(|| None);
    let mut loading = use_signal(|| true);

    use_effect(use_reactive!(|token| {
        let svc = character_service.clone();
        let platform = platform.clone();
        spawn(async move {
            loading.set(true);
            match svc.shared(&token).await {
                Ok(loaded) => {
                    platform.set_page_title(&format!("{} - キャラクターシート", loaded.name));
                    character.set(Some(loaded));
                }
                Err(e) => {
                    tracing::info!(error = %e, "Shared character unavailable");
                    character.set(None);
                }
            }
            loading.set(false);
        });
    }));

    if loading() {
        return rsx! { LoadingSpinner {} };
    }
    let Some(loaded) = character() else {
        return rsx! {
            div {
                class: "max-w-3xl mx-auto p-12 text-center text-gray-400",
                "{INVALID_LINK_MESSAGE}"
            }
        };
    };

    let image_url = loaded.profile_image_url.clone().filter(|u| !u.is_empty());
    rsx! {
        div {
            class: "max-w-5xl mx-auto p-6 flex flex-col gap-6",
            div { class: "text-sm text-gray-400", "キャラクターシート" }
            div {
                class: "flex gap-6 items-start",
                if let Some(url) = image_url {
                    img { class: "w-32 h-32 rounded-lg object-cover", src: "{url}", alt: "{loaded.name}" }
                }
                div {
                    class: "flex flex-col gap-2",
                    h1 { class: "m-0 text-2xl", "{loaded.name}" }
                    div { class: "text-gray-400", "{loaded.system.display_name()}" }
                    TagList { tags: loaded.tags.clone() }
                }
            }
            SheetView { system: loaded.system, sheet_data: loaded.sheet_data.clone() }
        }
    }
}
