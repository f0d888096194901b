//! Shinobigami form: school, attributes, the skill table and ninpo

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::shinobigami::{
    domain_for_school, skill_at, Ninpo, ShinobigamiAttributes, ShinobigamiSheet, DOMAINS,
    MAX_SKILLS, SCHOOLS, SKILL_TABLE_ROWS,
};

use super::fields::{AddRowButton, CellText, NumberInput, RemoveRowButton, TextArea};
use crate::application::sheet_edit::shinobigami::ShinobigamiEdit;
use crate::application::sheet_edit::RowOp;
use crate::ui::presentation::components::SectionTitle;

#[derive(Props, Clone, PartialEq)]
pub struct ShinobigamiFormProps {
    pub sheet: ShinobigamiSheet,
    /// Message from the last refused edit.
    #[props(default)]
    pub error: Option<String>,
    pub on_edit: EventHandler<ShinobigamiEdit>,
}

#[component]
pub fn ShinobigamiForm(props: ShinobigamiFormProps) -> Element {
    let on_edit = props.on_edit;
    let sheet = &props.sheet;
    let own_domain = domain_for_school(&sheet.school);

    rsx! {
        div {
            class: "flex flex-col gap-8",

            section {
                SectionTitle { title: "流派" }
                select {
                    class: "input",
                    value: "{sheet.school}",
                    onchange: move |e| on_edit.call(ShinobigamiEdit::School(e.value())),
                    option { value: "", "(選択してください)" }
                    for school in SCHOOLS.iter() {
                        option { key: "{school.name}", value: "{school.name}", "{school.name}" }
                    }
                }
            }

            section {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-6 gap-3",
                    for key in ShinobigamiAttributes::KEYS {
                        NumberInput {
                            key: "{key}",
                            label: key.to_string(),
                            value: sheet.attributes.get(key).unwrap_or(0),
                            on_input: move |value| on_edit.call(ShinobigamiEdit::Attribute {
                                key: key.to_string(),
                                value,
                            }),
                        }
                    }
                }
            }

            section {
                SectionTitle { title: "特技 ({sheet.skills.len()}/{MAX_SKILLS})" }
                if let Some(err) = props.error.as_ref() {
                    div { class: "text-red-400 text-sm mb-2", "{err}" }
                }
                table {
                    class: "sheet-table skill-grid",
                    thead {
                        tr {
                            th {}
                            for domain in DOMAINS {
                                th {
                                    key: "{domain}",
                                    class: if domain == own_domain { "text-yellow-400" } else { "" },
                                    "{domain}"
                                }
                            }
                        }
                    }
                    tbody {
                        for row in SKILL_TABLE_ROWS {
                            tr {
                                key: "{row}",
                                td { class: "text-gray-400", "{row}" }
                                for domain in DOMAINS {
                                    if let Some(name) = skill_at(row, domain) {
                                        td {
                                            key: "{domain}",
                                            class: if sheet.has_skill(name) { "skill-cell selected" } else { "skill-cell" },
                                            onclick: move |_| on_edit.call(ShinobigamiEdit::ToggleSkill(name.to_string())),
                                            "{name}"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section {
                SectionTitle { title: "忍法" }
                for (index, ninpo) in sheet.ninpo.iter().cloned().enumerate() {
                    NinpoRow { key: "{index}", index, ninpo, on_edit }
                }
                AddRowButton {
                    label: "忍法を追加",
                    on_click: move |_| on_edit.call(ShinobigamiEdit::Ninpo(RowOp::Add(Ninpo::default()))),
                }
            }

            section {
                class: "flex flex-col gap-4",
                TextArea {
                    label: "背景",
                    value: sheet.background.clone(),
                    on_input: move |v| on_edit.call(ShinobigamiEdit::Background(v)),
                }
                label {
                    class: "flex items-center gap-2",
                    input {
                        r#type: "checkbox",
                        checked: sheet.secret_flag,
                        onchange: move |e| on_edit.call(ShinobigamiEdit::SecretFlag(e.checked())),
                    }
                    "秘密あり"
                }
            }
        }
    }
}

#[component]
fn NinpoRow(index: usize, ninpo: Ninpo, on_edit: EventHandler<ShinobigamiEdit>) -> Element {
    let update = move |next: Ninpo| on_edit.call(ShinobigamiEdit::Ninpo(RowOp::Update(index, next)));

    let n = ninpo.clone();
    let set_name = move |v: String| update(Ninpo { name: v, ..n.clone() });
    let n = ninpo.clone();
    let set_kind = move |v: String| update(Ninpo { kind: v, ..n.clone() });
    let n = ninpo.clone();
    let set_skill = move |v: String| update(Ninpo { skill: v, ..n.clone() });
    let n = ninpo.clone();
    let set_range = move |v: String| update(Ninpo { range: v, ..n.clone() });
    let n = ninpo.clone();
    let set_cost = move |v: String| update(Ninpo { cost: v, ..n.clone() });
    let n = ninpo.clone();
    let set_page = move |v: String| update(Ninpo { page: v, ..n.clone() });

    rsx! {
        div {
            class: "grid grid-cols-7 gap-2 items-center mb-2",
            CellText { value: ninpo.name.clone(), on_input: set_name }
            CellText { value: ninpo.kind.clone(), on_input: set_kind }
            CellText { value: ninpo.skill.clone(), on_input: set_skill }
            CellText { value: ninpo.range.clone(), on_input: set_range }
            CellText { value: ninpo.cost.clone(), on_input: set_cost }
            CellText { value: ninpo.page.clone(), on_input: set_page }
            RemoveRowButton {
                on_click: move |_| on_edit.call(ShinobigamiEdit::Ninpo(RowOp::Remove(index))),
            }
        }
    }
}
