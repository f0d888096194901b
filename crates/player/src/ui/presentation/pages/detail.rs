//! Character detail: header, actions, sharing, sheet and change history

use dioxus::prelude::*;
use sheetkeeper_domain::{AuditAction, AuditLogEntry};
use sheetkeeper_shared::CharacterResponse;
use uuid::Uuid;

use crate::application::services::share_url;
use crate::ports::outbound::PlatformPort;
use crate::ui::use_platform;
use crate::ui::presentation::components::{
    copy_to_clipboard, CocofoliaExportModal, ConfirmDialog, DiceRoller, ErrorBanner, ImageModal,
    LoadingSpinner, SectionTitle, TagList,
};
use crate::ui::presentation::services::use_character_service;
use crate::ui::presentation::state::use_toast;
use crate::ui::presentation::views::SheetView;
use crate::ui::routes::Route;

pub fn action_label(action: AuditAction) -> &'static str {
    match action {
        AuditAction::Create => "作成",
        AuditAction::Update => "更新",
        AuditAction::Publish => "公開",
        AuditAction::Unpublish => "非公開",
        AuditAction::Delete => "削除",
    }
}

#[component]
pub fn DetailPage(id: Uuid) -> Element {
    let character_service = use_character_service();
    let platform = use_platform();

    let mut character: Signal<Option<CharacterResponse>> = use_signal(|| None);
    let mut loading = use_signal(|| true);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let svc = character_service.clone();
    let title_platform = platform.clone();
    use_effect(use_reactive!(|id| {
        let svc = svc.clone();
        let platform = title_platform.clone();
        spawn(async move {
            loading.set(true);
            match svc.get(id).await {
                Ok(loaded) => {
                    platform.set_page_title(&loaded.name);
                    character.set(Some(loaded));
                    error.set(None);
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Failed to load character");
                    error.set(Some(e.user_message()));
                }
            }
            loading.set(false);
        });
    }));

    if loading() && character.read().is_none() {
        return rsx! { LoadingSpinner {} };
    }
    let Some(loaded) = character() else {
        return rsx! {
            div {
                class: "max-w-3xl mx-auto p-6 flex flex-col gap-4",
                ErrorBanner { message: error() }
                p { class: "text-gray-400", "キャラクターが見つかりません" }
                Link { to: Route::DashboardRoute {}, class: "btn btn-secondary self-start", "マイページに戻る" }
            }
        };
    };

    rsx! {
        CharacterDetail {
            character: loaded,
            on_change: move |next| character.set(Some(next)),
        }
    }
}

#[component]
fn CharacterDetail(character: CharacterResponse, on_change: EventHandler<CharacterResponse>) -> Element {
    let character_service = use_character_service();
    let platform = use_platform();
    let navigator = use_navigator();
    let mut toast = use_toast();

    let mut show_image = use_signal(|| false);
    let mut confirm_delete = use_signal(|| false);
    let mut show_export = use_signal(|| false);
    let mut busy = use_signal(|| false);

    let id = character.id;
    let system = character.system;
    let image_url = character
        .profile_image_url
        .clone()
        .filter(|u| !u.is_empty());
    let link = character
        .share_token
        .as_deref()
        .filter(|_| character.is_public)
        .map(|token| share_url(&platform.api_base_url(), token));

    let svc = character_service.clone();
    let delete_platform = platform.clone();
    let delete = move |_: ()| {
        confirm_delete.set(false);
        let svc = svc.clone();
        let platform = delete_platform.clone();
        spawn(async move {
            busy.set(true);
            match svc.delete(id).await {
                Ok(()) => {
                    tracing::info!(character_id = %id, "Deleted character");
                    toast.success(&platform, "キャラクターを削除しました");
                    navigator.push(Route::DashboardRoute {});
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Failed to delete character");
                    toast.error(&platform, e.user_message());
                }
            }
            busy.set(false);
        });
    };

    let svc = character_service.clone();
    let publish_platform = platform.clone();
    let current = character.clone();
    let toggle_public = move |_: MouseEvent| {
        let svc = svc.clone();
        let platform = publish_platform.clone();
        let mut next = current.clone();
        let make_public = !next.is_public;
        spawn(async move {
            busy.set(true);
            match svc.set_public(id, make_public).await {
                Ok(res) => {
                    next.is_public = res.is_public;
                    next.share_token = res.share_token;
                    on_change.call(next);
                    toast.success(&platform, if res.is_public { "公開しました" } else { "非公開にしました" });
                }
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Failed to change visibility");
                    toast.error(&platform, e.user_message());
                }
            }
            busy.set(false);
        });
    };

    let copy_platform = platform.clone();
    let copied_link = link.clone();
    let copy_link = move |_: MouseEvent| {
        if let Some(url) = copied_link.as_ref() {
            copy_to_clipboard(url);
            toast.success(&copy_platform, "共有リンクをコピーしました");
        }
    };

    rsx! {
        div {
            class: "max-w-5xl mx-auto p-6 flex flex-col gap-6",

            Link { to: Route::DashboardRoute {}, class: "text-gray-400", "← マイページに戻る" }

            div {
                class: "flex gap-6 items-start",
                if let Some(url) = image_url.clone() {
                    img {
                        class: "w-32 h-32 rounded-lg object-cover cursor-pointer",
                        src: "{url}",
                        alt: "{character.name}",
                        onclick: move |_| show_image.set(true),
                    }
                } else {
                    div {
                        class: "w-32 h-32 rounded-lg bg-gray-700 flex items-center justify-center text-sm text-gray-400",
                        "プロフィール画像なし"
                    }
                }
                div {
                    class: "flex-1 flex flex-col gap-2",
                    h1 { class: "m-0 text-2xl", "{character.name}" }
                    div { class: "text-gray-400", "{system.display_name()}" }
                    TagList { tags: character.tags.clone() }
                }
                div {
                    class: "flex flex-col gap-2",
                    Link { to: Route::EditRoute { id }, class: "btn btn-primary", "編集" }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        disabled: busy(),
                        onclick: toggle_public,
                        if character.is_public { "非公開にする" } else { "公開する" }
                    }
                    if system.is_cthulhu() {
                        button {
                            r#type: "button",
                            class: "btn btn-secondary",
                            onclick: move |_| show_export.set(true),
                            "ココフォリア出力"
                        }
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-danger",
                        disabled: busy(),
                        onclick: move |_| confirm_delete.set(true),
                        "削除"
                    }
                }
            }

            if let Some(url) = link {
                div {
                    class: "panel flex gap-2 items-center",
                    span { class: "text-gray-400", "共有リンク:" }
                    code { class: "flex-1 break-all", "{url}" }
                    button {
                        r#type: "button",
                        class: "btn btn-secondary btn-sm",
                        onclick: copy_link,
                        "コピー"
                    }
                }
            }

            SheetView { system, sheet_data: character.sheet_data.clone() }

            section {
                SectionTitle { title: "ダイスロール" }
                DiceRoller {}
            }

            AuditLogList { id }
        }

        if show_image() {
            if let Some(url) = image_url {
                ImageModal {
                    image_url: url,
                    alt: character.name.clone(),
                    on_close: move |_| show_image.set(false),
                }
            }
        }
        if confirm_delete() {
            ConfirmDialog {
                message: "本当に削除しますか？",
                confirm_label: "削除",
                on_confirm: delete,
                on_cancel: move |_| confirm_delete.set(false),
            }
        }
        if show_export() {
            CocofoliaExportModal {
                character_id: id,
                system,
                on_close: move |_| show_export.set(false),
            }
        }
    }
}

#[component]
fn AuditLogList(id: Uuid) -> Element {
    let character_service = use_character_service();
    let mut entries: Signal<Vec<AuditLogEntry>> = use_signal(Vec::new);

    use_effect(use_reactive!(|id| {
        let svc = character_service.clone();
        spawn(async move {
            match svc.audit_logs(id).await {
                Ok(logs) => entries.set(logs),
                Err(e) => tracing::warn!(character_id = %id, error = %e, "Failed to load audit logs"),
            }
        });
    }));

    let rows: Vec<(String, &str)> = entries
        .read()
        .iter()
        .map(|e| (e.created_at.format("%Y-%m-%d %H:%M").to_string(), action_label(e.action)))
        .collect();
    if rows.is_empty() {
        return rsx! {};
    }
    rsx! {
        section {
            SectionTitle { title: "変更履歴" }
            ul {
                class: "flex flex-col gap-1 text-sm",
                for (i, (at, label)) in rows.into_iter().enumerate() {
                    li {
                        key: "{i}",
                        span { class: "text-gray-400", "{at} " }
                        "{label}"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_action_has_a_label() {
        for action in [
            AuditAction::Create,
            AuditAction::Update,
            AuditAction::Publish,
            AuditAction::Unpublish,
            AuditAction::Delete,
        ] {
            assert!(!action_label(action).is_empty());
        }
    }
}
