//! Free-form `XdY` roller backed by the Engine

use dioxus::prelude::*;
use sheetkeeper_shared::DiceRollResponse;

use crate::ui::presentation::services::use_dice_service;

#[component]
pub fn DiceRoller(#[props(default = "3d6".to_string())] initial_formula: String) -> Element {
    let dice_service = use_dice_service();

    let mut formula = use_signal(|| initial_formula.clone());
    let mut result: Signal<Option<DiceRollResponse>> = use_signal(|| None);
    let mut loading = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let roll = move || {
        if *loading.peek() {
            return;
        }
        let text = formula.peek().trim().to_string();
        if text.is_empty() {
            error.set(Some("ダイス式を入力してください".to_string()));
            return;
        }
        let svc = dice_service.clone();
        spawn(async move {
            loading.set(true);
            error.set(None);
            result.set(None);
            match svc.roll(&text).await {
                Ok(r) => {
                    tracing::debug!(formula = %text, total = r.total, "Dice rolled");
                    result.set(Some(r));
                }
                Err(e) => {
                    tracing::warn!(formula = %text, error = %e, "Dice roll failed");
                    error.set(Some(match e.status() {
                        Some(_) => e.user_message(),
                        None => "ダイスロールに失敗しました".to_string(),
                    }));
                }
            }
            loading.set(false);
        });
    };
    let mut roll_on_enter = roll.clone();
    let mut roll_on_click = roll;

    rsx! {
        div {
            class: "dice-roller flex flex-col gap-2",
            label { class: "font-bold", "ダイスロール" }
            div {
                class: "flex gap-2 items-start flex-wrap",
                input {
                    r#type: "text",
                    class: "input",
                    placeholder: "3d6",
                    value: "{formula}",
                    disabled: *loading.read(),
                    oninput: move |e| {
                        formula.set(e.value());
                        error.set(None);
                        result.set(None);
                    },
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            roll_on_enter();
                        }
                    },
                }
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    disabled: *loading.read(),
                    onclick: move |_| roll_on_click(),
                    if *loading.read() { "ロール中..." } else { "ロール" }
                }
            }
            if let Some(r) = result.read().as_ref() {
                div {
                    class: "dice-result",
                    span { class: "text-gray-400", "{format_rolls(&r.rolls)} = " }
                    strong { "{r.total}" }
                }
            }
            if let Some(err) = error.read().as_ref() {
                div { class: "text-red-400 text-sm", "{err}" }
            }
        }
    }
}

fn format_rolls(rolls: &[i32]) -> String {
    let parts: Vec<String> = rolls.iter().map(|r| r.to_string()).collect();
    format!("[{}]", parts.join(", "))
}
