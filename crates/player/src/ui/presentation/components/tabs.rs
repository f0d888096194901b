//! Tab strip; the owner renders the panel for the active index

use dioxus::prelude::*;

#[component]
pub fn TabBar(labels: Vec<&'static str>, mut active: Signal<usize>) -> Element {
    let selected = *active.read();
    rsx! {
        div {
            class: "flex gap-1 border-b border-gray-700 mb-4",
            role: "tablist",
            for (index, label) in labels.into_iter().enumerate() {
                button {
                    key: "{label}",
                    r#type: "button",
                    role: "tab",
                    class: if index == selected { "tab tab-active" } else { "tab" },
                    onclick: move |_| active.set(index),
                    "{label}"
                }
            }
        }
    }
}
