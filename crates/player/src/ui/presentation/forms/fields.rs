//! Labelled inputs used by every sheet form

use dioxus::prelude::*;

use crate::application::sheet_edit::{parse_number, parse_optional_number};

#[component]
pub fn TextInput(label: String, value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        div {
            label { class: "label", "{label}" }
            input {
                r#type: "text",
                class: "input",
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

#[component]
pub fn NumberInput(label: String, value: i32, on_input: EventHandler<i32>) -> Element {
    rsx! {
        div {
            label { class: "label", "{label}" }
            input {
                r#type: "number",
                class: "input",
                value: "{value}",
                oninput: move |e| on_input.call(parse_number(&e.value())),
            }
        }
    }
}

/// Number input that may be left blank.
#[component]
pub fn OptionalNumberInput(
    label: String,
    value: Option<i32>,
    on_input: EventHandler<Option<i32>>,
) -> Element {
    let shown = value.map(|v| v.to_string()).unwrap_or_default();
    rsx! {
        div {
            label { class: "label", "{label}" }
            input {
                r#type: "number",
                class: "input",
                value: "{shown}",
                oninput: move |e| on_input.call(parse_optional_number(&e.value())),
            }
        }
    }
}

#[component]
pub fn TextArea(
    label: String,
    value: String,
    on_input: EventHandler<String>,
    #[props(default = 4)] rows: u32,
) -> Element {
    rsx! {
        div {
            label { class: "label", "{label}" }
            textarea {
                class: "input",
                rows: "{rows}",
                value: "{value}",
                oninput: move |e| on_input.call(e.value()),
            }
        }
    }
}

/// Small cell input for table rows.
#[component]
pub fn CellNumber(value: i32, on_input: EventHandler<i32>) -> Element {
    rsx! {
        input {
            r#type: "number",
            class: "input input-cell",
            value: "{value}",
            oninput: move |e| on_input.call(parse_number(&e.value())),
        }
    }
}

#[component]
pub fn CellText(value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        input {
            r#type: "text",
            class: "input input-cell",
            value: "{value}",
            oninput: move |e| on_input.call(e.value()),
        }
    }
}

#[component]
pub fn AddRowButton(label: String, on_click: EventHandler<()>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn btn-secondary btn-sm",
            onclick: move |_| on_click.call(()),
            "+ {label}"
        }
    }
}

#[component]
pub fn RemoveRowButton(on_click: EventHandler<()>) -> Element {
    rsx! {
        button {
            r#type: "button",
            class: "btn btn-danger btn-sm",
            onclick: move |_| on_click.call(()),
            "削除"
        }
    }
}
