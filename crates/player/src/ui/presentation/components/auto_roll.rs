//! Characteristic auto-roll for Cthulhu sheets
//!
//! Saved characters roll on the Engine. The create form has no character yet, so
//! it rolls locally with the platform's random source.

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::cthulhu::{compute_derived, roll_attributes, CthulhuAttributes};
use sheetkeeper_domain::GameSystem;
use sheetkeeper_shared::AutoRollResponse;
use uuid::Uuid;

use crate::ports::outbound::PlatformPort;
use crate::state::Platform;
use crate::ui::use_platform;
use crate::ui::presentation::services::use_character_service;

pub const UNSUPPORTED_MESSAGE: &str =
    "能力値自動生成は現在クトゥルフ神話TRPG（第6版/第7版）のみ対応しています";

/// Rolls locally, producing the same shape the Engine returns.
pub fn roll_locally(platform: &Platform, system: GameSystem) -> Option<AutoRollResponse> {
    let edition = system.cthulhu_edition()?;
    let attributes = roll_attributes(edition, |sides| {
        platform.random_range(1, i32::from(sides)).clamp(1, i32::from(sides)) as u16
    });
    Some(AutoRollResponse {
        attributes,
        derived: compute_derived(edition, &attributes),
    })
}

#[derive(Props, Clone, PartialEq)]
pub struct AutoRollAttributesProps {
    pub system: GameSystem,
    #[props(default)]
    pub character_id: Option<Uuid>,
    pub on_apply: EventHandler<CthulhuAttributes>,
}

#[component]
pub fn AutoRollAttributes(props: AutoRollAttributesProps) -> Element {
    let platform = use_platform();
    let character_service = use_character_service();

    let mut result: Signal<Option<AutoRollResponse>> = use_signal(|| None);
    let mut loading = use_signal(|| false);
    let mut error: Signal<Option<String>> = use_signal(|| None);

    let system = props.system;
    let supported = system.is_cthulhu();
    let character_id = props.character_id;

    let roll = move |_: MouseEvent| {
        if !supported {
            error.set(Some(UNSUPPORTED_MESSAGE.to_string()));
            return;
        }
        error.set(None);
        result.set(None);

        let Some(id) = character_id else {
            result.set(roll_locally(&platform, system));
            return;
        };
        let svc = character_service.clone();
        spawn(async move {
            loading.set(true);
            match svc.auto_roll(id, system).await {
                Ok(rolled) => result.set(Some(rolled)),
                Err(e) => {
                    tracing::warn!(character_id = %id, error = %e, "Auto-roll failed");
                    error.set(Some(match e.status() {
                        Some(_) => e.user_message(),
                        None => "能力値の自動生成に失敗しました".to_string(),
                    }));
                }
            }
            loading.set(false);
        });
    };

    let on_apply = props.on_apply;
    let rolled = result.read().clone();

    rsx! {
        div {
            class: "panel flex flex-col gap-3",
            div {
                class: "flex justify-between items-center",
                h3 { class: "m-0 text-lg", "能力値自動生成" }
                button {
                    r#type: "button",
                    class: "btn btn-primary",
                    disabled: *loading.read() || !supported,
                    onclick: roll,
                    if *loading.read() { "生成中..." } else { "能力値を自動生成" }
                }
            }
            if !supported {
                div { class: "text-sm text-gray-400", "{UNSUPPORTED_MESSAGE}" }
            }
            if let Some(err) = error.read().as_ref() {
                div { class: "text-red-400 text-sm", "{err}" }
            }
            if let Some(rolled) = rolled {
                div {
                    h4 { class: "m-0 mb-2", "生成された能力値" }
                    div {
                        class: "grid grid-cols-4 gap-2 text-sm",
                        for (key, value) in attribute_pairs(&rolled.attributes) {
                            div {
                                key: "{key}",
                                class: "stat-cell",
                                span { class: "font-bold", "{key}:" }
                                span { "{value}" }
                            }
                        }
                    }
                }
                div {
                    h4 { class: "m-0 mb-2", "派生値" }
                    div {
                        class: "grid grid-cols-3 gap-2 text-sm",
                        div { class: "stat-cell", "SAN: {rolled.derived.san_current}/{rolled.derived.san_max}" }
                        div { class: "stat-cell", "HP: {rolled.derived.hp_current}/{rolled.derived.hp_max}" }
                        div { class: "stat-cell", "MP: {rolled.derived.mp_current}/{rolled.derived.mp_max}" }
                    }
                }
                button {
                    r#type: "button",
                    class: "btn btn-success self-start",
                    onclick: move |_| on_apply.call(rolled.attributes),
                    "この能力値を適用"
                }
            }
        }
    }
}

/// Rolled values in grid order, with LUK last when present.
fn attribute_pairs(attributes: &CthulhuAttributes) -> Vec<(&'static str, i32)> {
    let mut pairs: Vec<(&'static str, i32)> =
        sheetkeeper_domain::sheets::cthulhu::ATTRIBUTE_KEYS
            .iter()
            .filter_map(|key| attributes.get(key).map(|v| (*key, v)))
            .collect();
    if let Some(luk) = attributes.luk {
        pairs.push(("LUK", luk));
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::create_mock_platform;

    #[test]
    fn local_roll_uses_platform_random() {
        let platform = create_mock_platform();
        let rolled = roll_locally(&platform, GameSystem::Cthulhu7).expect("cthulhu");
        // The mock random source always returns the minimum.
        assert_eq!(rolled.attributes.str, 15);
        assert_eq!(rolled.attributes.siz, 40);
        assert_eq!(rolled.attributes.edu, 30);
        assert_eq!(rolled.attributes.luk, Some(15));
        assert_eq!(rolled.derived.san_current, rolled.derived.san_max);
    }

    #[test]
    fn other_systems_do_not_roll() {
        let platform = create_mock_platform();
        assert!(roll_locally(&platform, GameSystem::Shinobigami).is_none());
    }

    #[test]
    fn luck_follows_the_grid() {
        let attributes = CthulhuAttributes {
            str: 50,
            luk: Some(60),
            ..CthulhuAttributes::default()
        };
        let pairs = attribute_pairs(&attributes);
        assert_eq!(pairs.first(), Some(&("STR", 50)));
        assert_eq!(pairs.last(), Some(&("LUK", 60)));
        assert_eq!(pairs.len(), 9);
    }
}
