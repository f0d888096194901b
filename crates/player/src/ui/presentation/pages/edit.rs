//! Edit an existing character

use dioxus::prelude::*;
use sheetkeeper_domain::GameSystem;
use uuid::Uuid;

use crate::application::sheet_edit::{update_request, BasicInfo, SheetDraft};
use crate::ports::outbound::PlatformPort;
use crate::ui::use_platform;
use crate::ui::presentation::components::{BasicInfoForm, ErrorBanner, LoadingSpinner, SectionTitle};
use crate::ui::presentation::forms::SheetForm;
use crate::ui::presentation::services::use_character_service;
use crate::ui::presentation::state::use_toast;
use crate::ui::routes::Route;

const INVALID_JSON_MESSAGE: &str = "シートデータが正しいJSON形式ではありません";

#[component]
pub fn EditPage(id: Uuid) -> Element {
    let character_service = use_character_service();
    let platform = use_platform();
    let navigator = use_navigator();
    let mut toast = use_toast();

    let mut system: Signal<Option<GameSystem>> = use_signal(|| None);
    let mut info = use_signal(BasicInfo::default);
    let mut draft = use_signal(|| SheetDraft::Generic { text: String::new() });
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let svc = character_service.clone();
    let title_platform = platform.clone();
    use_effect(use_reactive!(|id| {
        let svc = svc.clone();
        let platform = title_platform.clone();
        spawn(async move {
            loading.set(true);
            match svc.get(id).await {
                Ok(character) => {
                    platform.set_page_title(&format!("{} を編集", character.name));
                    info.set(BasicInfo::from_character(&character));
                    draft.set(SheetDraft::from_stored(character.system, &character.sheet_data));
                    system.set(Some(character.system));
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Failed to load character for editing");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    }));

    let submit = move |e: FormEvent| {
        e.prevent_default();
        if matches!(&*draft.read(), SheetDraft::Generic { .. }) && draft.read().to_value().is_err() {
            error.set(Some(INVALID_JSON_MESSAGE.to_string()));
            return;
        }
        let request = match update_request(&info.read(), &draft.read()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        let svc = character_service.clone();
        let platform = platform.clone();
        spawn(async move {
            saving.set(true);
            error.set(None);
            match svc.update(id, &request).await {
                Ok(_) => {
                    tracing::info!(character_id = %id, "Updated character");
                    toast.success(&platform, "保存しました");
                    navigator.push(Route::DetailRoute { id });
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Failed to update character");
                    let message = match e.status() {
                        Some(_) => e.user_message(),
                        None => "更新に失敗しました".to_string(),
                    };
                    error.set(Some(message));
                }
            }
            saving.set(false);
        });
    };

    if loading() {
        return rsx! { LoadingSpinner {} };
    }
    let Some(loaded_system) = system() else {
        return rsx! {
            div {
                class: "max-w-3xl mx-auto p-6 flex flex-col gap-4",
                ErrorBanner { message: error() }
                Link { to: Route::DashboardRoute {}, class: "btn btn-secondary self-start", "マイページに戻る" }
            }
        };
    };

    rsx! {
        div {
            class: "max-w-5xl mx-auto p-6",
            h1 { class: "text-2xl mb-2", "キャラクター編集" }
            p { class: "text-gray-400 mb-6", "{loaded_system.display_name()}" }

            form {
                class: "flex flex-col gap-8",
                onsubmit: submit,

                section {
                    SectionTitle { title: "基本情報" }
                    BasicInfoForm {
                        info: info(),
                        character_id: id,
                        on_change: move |next| info.set(next),
                    }
                }

                SheetForm { draft, system: loaded_system, character_id: id }

                ErrorBanner { message: error() }

                div {
                    class: "flex justify-end gap-2",
                    Link { to: Route::DetailRoute { id }, class: "btn btn-secondary", "キャンセル" }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: saving(),
                        if saving() { "保存中..." } else { "保存" }
                    }
                }
            }
        }
    }
}
