//! New character: pick a system, fill the sheet, save

use dioxus::prelude::*;
use sheetkeeper_domain::GameSystem;

use crate::application::sheet_edit::{create_request, BasicInfo, SheetDraft};
use crate::ui::use_platform;
use crate::ui::presentation::components::{BasicInfoForm, ErrorBanner, SectionTitle};
use crate::ui::presentation::forms::SheetForm;
use crate::ui::presentation::services::use_character_service;
use crate::ui::presentation::state::use_toast;
use crate::ui::routes::Route;

const DEFAULT_SYSTEM: GameSystem = GameSystem::Cthulhu6;

#[component]
pub fn CreatePage() -> Element {
    let character_service = use_character_service();
    let platform = use_platform();
    let navigator = use_navigator();
    let mut toast = use_toast();

    let mut system = use_signal(|| DEFAULT_SYSTEM);
    let mut info = use_signal(BasicInfo::default);
    let mut draft = use_signal(|| SheetDraft::for_create(DEFAULT_SYSTEM));
    let mut saving = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let mut change_system = move |next: GameSystem| {
        system.set(next);
        draft.set(SheetDraft::for_create(next));
        error.set(None);
    };

    let submit = move |e: FormEvent| {
        e.prevent_default();
        let request = match create_request(system(), &info.read(), &draft.read()) {
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
            match svc.create(&request).await {
                Ok(created) => {
                    tracing::info!(character_id = %created.id, system = %created.system, "Created character");
                    toast.success(&platform, "キャラクターを作成しました");
                    navigator.push(Route::DetailRoute { id: created.id });
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to create character");
                    let message = match e.status() {
                        Some(_) => e.user_message(),
                        None => "キャラクターの作成に失敗しました".to_string(),
                    };
                    error.set(Some(message));
                }
            }
            saving.set(false);
        });
    };

    rsx! {
        div {
            class: "max-w-5xl mx-auto p-6",
            h1 { class: "text-2xl mb-6", "キャラクター作成" }

            form {
                class: "flex flex-col gap-8",
                onsubmit: submit,

                section {
                    SectionTitle { title: "システムを選択" }
                    div {
                        class: "flex flex-wrap gap-2",
                        for s in GameSystem::ALL {
                            button {
                                key: "{s.as_str()}",
                                r#type: "button",
                                class: if system() == s { "btn btn-primary" } else { "btn btn-secondary" },
                                onclick: move |_| change_system(s),
                                "{s.display_name()}"
                            }
                        }
                    }
                }

                section {
                    SectionTitle { title: "基本情報" }
                    BasicInfoForm {
                        info: info(),
                        on_change: move |next| info.set(next),
                    }
                }

                SheetForm { key: "{system().as_str()}", draft, system: system() }

                ErrorBanner { message: error() }

                div {
                    class: "flex justify-end gap-2",
                    Link { to: Route::DashboardRoute {}, class: "btn btn-secondary", "キャンセル" }
                    button {
                        r#type: "submit",
                        class: "btn btn-primary",
                        disabled: saving(),
                        if saving() { "作成中..." } else { "作成" }
                    }
                }
            }
        }
    }
}
