//! Small building blocks: spinner, error banner, confirm dialog, tags, toasts

use dioxus::prelude::*;

use crate::ui::presentation::state::use_toast;

#[component]
pub fn LoadingSpinner(#[props(default = "読み込み中...".to_string())] message: String) -> Element {
    rsx! {
        div {
            class: "flex items-center justify-center p-12 text-gray-400",
            "{message}"
        }
    }
}

/// Red error box; renders nothing without a message.
#[component]
pub fn ErrorBanner(message: Option<String>) -> Element {
    let Some(message) = message else {
        return rsx! {};
    };
    rsx! {
        div {
            class: "bg-red-500/10 border border-red-500 rounded-lg p-4 text-red-400 whitespace-pre-line",
            "{message}"
        }
    }
}

#[component]
pub fn SectionTitle(title: String) -> Element {
    rsx! {
        h3 {
            class: "section-title",
            "{title}"
        }
    }
}

#[component]
pub fn TagList(tags: Vec<String>) -> Element {
    if tags.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "flex flex-wrap gap-2",
            for tag in tags.iter() {
                span {
                    key: "{tag}",
                    class: "tag",
                    "{tag}"
                }
            }
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ConfirmDialogProps {
    pub message: String,
    #[props(default = "確認".to_string())]
    pub confirm_label: String,
    pub on_confirm: EventHandler<()>,
    pub on_cancel: EventHandler<()>,
}

/// Modal yes/no prompt. Clicking the backdrop cancels.
#[component]
pub fn ConfirmDialog(props: ConfirmDialogProps) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/80 flex items-center justify-center z-[1000]",
            onclick: move |_| props.on_cancel.call(()),

            div {
                class: "bg-dark-surface rounded-xl max-w-[420px] w-[90%] p-6 flex flex-col gap-4",
                onclick: move |e| e.stop_propagation(),

                p { class: "m-0 text-white", "{props.message}" }

                div {
                    class: "flex justify-end gap-2",
                    button {
                        r#type: "button",
                        class: "btn btn-secondary",
                        onclick: move |_| props.on_cancel.call(()),
                        "キャンセル"
                    }
                    button {
                        r#type: "button",
                        class: "btn btn-danger",
                        onclick: move |_| props.on_confirm.call(()),
                        "{props.confirm_label}"
                    }
                }
            }
        }
    }
}

/// Renders the current toast from [`ToastState`](crate::ui::presentation::state::ToastState).
#[component]
pub fn ToastHost() -> Element {
    let mut toasts = use_toast();
    let current = toasts.current.read().clone();

    rsx! {
        if let Some(toast) = current {
            div {
                key: "{toast.id}",
                class: "{toast.kind.class()}",
                role: "status",
                onclick: move |_| toasts.dismiss(),
                "{toast.message}"
            }
        }
    }
}

/// Writes text to the system clipboard through the webview.
pub fn copy_to_clipboard(text: &str) {
    let literal = serde_json::Value::String(text.to_string()).to_string();
    let _ = document::eval(&format!("navigator.clipboard.writeText({literal});"));
}
