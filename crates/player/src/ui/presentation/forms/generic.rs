//! Raw JSON editor for systems without a dedicated form

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::generic::parse_sheet_text;

#[component]
pub fn GenericForm(text: String, on_input: EventHandler<String>) -> Element {
    let problem = parse_sheet_text(&text).err();
    rsx! {
        div {
            class: "flex flex-col gap-2",
            label { class: "label", "シートデータ (JSON)" }
            textarea {
                class: "input font-mono",
                rows: "20",
                value: "{text}",
                oninput: move |e| on_input.call(e.value()),
            }
            if let Some(problem) = problem {
                div { class: "text-yellow-400 text-sm", "{problem}" }
            }
        }
    }
}
