//! Cocofolia clipboard export dialog (Cthulhu only)

use dioxus::prelude::*;
use sheetkeeper_domain::{DiceStyle, GameSystem, SkillScope};
use sheetkeeper_shared::CocofoliaExportQuery;
use uuid::Uuid;

use super::common::copy_to_clipboard;
use crate::ui::use_platform;
use crate::ui::presentation::services::use_character_service;
use crate::ui::presentation::state::use_toast;

#[derive(Props, Clone, PartialEq)]
pub struct CocofoliaExportModalProps {
    pub character_id: Uuid,
    pub system: GameSystem,
    pub on_close: EventHandler<()>,
}

#[component]
pub fn CocofoliaExportModal(props: CocofoliaExportModalProps) -> Element {
    let character_service = use_character_service();
    let platform = use_platform();
    let mut toast = use_toast();

    let mut skill_scope = use_signal(|| SkillScope::Changed);
    let mut dice = use_signal(|| DiceStyle::Ccb);
    let mut include_icon = use_signal(|| false);
    let mut loading = use_signal(|| false);
    let mut text = use_signal(String::new);

    let character_id = props.character_id;
    let system = props.system;

    let export = move |_: MouseEvent| {
        let svc = character_service.clone();
        let platform = platform.clone();
        let mut query = CocofoliaExportQuery::new(system.as_str());
        query.skill_scope = skill_scope.peek().as_str().to_string();
        query.dice = dice.peek().as_str().to_string();
        query.include_icon = *include_icon.peek();
        spawn(async move {
            loading.set(true);
            match svc.export_cocofolia(character_id, &query).await {
                Ok(res) => {
                    copy_to_clipboard(&res.clipboard_text);
                    text.set(res.clipboard_text);
                    toast.success(&platform, "ココフォリア用データをコピーしました");
                }
                Err(e) => {
                    tracing::warn!(character_id = %character_id, error = %e, "Cocofolia export failed");
                    toast.error(&platform, e.user_message());
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div {
            class: "fixed inset-0 bg-black/80 flex items-center justify-center z-[1000]",
            onclick: move |_| props.on_close.call(()),

            div {
                class: "bg-dark-surface rounded-xl max-w-[720px] w-[90%] max-h-[85vh] overflow-hidden flex flex-col",
                onclick: move |e| e.stop_propagation(),

                div {
                    class: "flex items-center justify-between p-4 border-b border-gray-700",
                    h2 { class: "m-0 text-xl", "ココフォリア出力" }
                    button {
                        r#type: "button",
                        class: "bg-transparent border-none text-gray-400 text-2xl cursor-pointer",
                        onclick: move |_| props.on_close.call(()),
                        "×"
                    }
                }

                div {
                    class: "flex-1 overflow-y-auto p-4 flex flex-col gap-4",

                    div {
                        label { class: "label", "技能の出力範囲" }
                        select {
                            class: "input",
                            value: "{skill_scope.read().as_str()}",
                            onchange: move |e| {
                                if let Ok(scope) = e.value().parse() {
                                    skill_scope.set(scope);
                                }
                            },
                            option { value: "changed", "初期値から変更した技能のみ" }
                            option { value: "all", "すべての技能" }
                        }
                    }

                    div {
                        label { class: "label", "ダイスコマンド形式" }
                        select {
                            class: "input",
                            value: "{dice.read().as_str()}",
                            onchange: move |e| {
                                if let Ok(style) = e.value().parse() {
                                    dice.set(style);
                                }
                            },
                            option { value: "CCB", "CCB" }
                            option { value: "CC", "CC" }
                        }
                    }

                    label {
                        class: "flex items-center gap-2",
                        input {
                            r#type: "checkbox",
                            checked: *include_icon.read(),
                            onchange: move |e| include_icon.set(e.checked()),
                        }
                        "画像（iconUrl）"
                    }

                    p {
                        class: "text-sm text-gray-400 m-0",
                        "出力したJSONをコピーして、ココフォリアに貼り付けてください。"
                        br {}
                        "キャラクターを公開している場合は、参照URLに共有リンクが付与されます。"
                    }

                    button {
                        r#type: "button",
                        class: "btn btn-primary self-start",
                        disabled: *loading.read(),
                        onclick: export,
                        if *loading.read() { "生成中..." } else { "生成してコピー" }
                    }

                    if !text.read().is_empty() {
                        div {
                            label { class: "label", "プレビュー（コピー対象）" }
                            textarea {
                                class: "input font-mono text-xs h-64",
                                readonly: true,
                                value: "{text}",
                            }
                        }
                    }
                }
            }
        }
    }
}
