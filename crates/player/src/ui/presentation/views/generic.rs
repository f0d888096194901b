//! Tree view for sheets without a dedicated layout

use dioxus::prelude::*;
use serde_json::Value;
use sheetkeeper_domain::sheets::generic::{sheet_entries, GenericNode, EMPTY_SHEET_LABEL};

#[component]
pub fn GenericSheetView(data: Value) -> Element {
    let Some(entries) = sheet_entries(&data) else {
        return rsx! {
            p { class: "text-gray-400", "{EMPTY_SHEET_LABEL}" }
        };
    };
    rsx! {
        dl {
            class: "generic-sheet",
            for (key, node) in entries {
                div {
                    key: "{key}",
                    class: "mb-3",
                    dt { class: "font-bold", "{key}" }
                    dd { NodeView { node } }
                }
            }
        }
    }
}

#[component]
fn NodeView(node: GenericNode) -> Element {
    match node {
        GenericNode::Leaf(text) => rsx! { span { "{text}" } },
        GenericNode::List(items) => rsx! {
            ul {
                class: "list-disc pl-5",
                for (i, item) in items.into_iter().enumerate() {
                    li { key: "{i}", NodeView { node: item } }
                }
            }
        },
        GenericNode::Object(fields) => rsx! {
            dl {
                class: "pl-4 border-l border-gray-700",
                for (key, value) in fields {
                    div {
                        key: "{key}",
                        dt { class: "text-sm text-gray-400", "{key}" }
                        dd { NodeView { node: value } }
                    }
                }
            }
        },
    }
}
