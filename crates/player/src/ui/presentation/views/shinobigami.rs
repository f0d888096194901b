//! Shinobigami sheet view

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::shinobigami::{
    creed_for_school, domain_for_school, nemesis_of, ShinobigamiAttributes, ShinobigamiSheet,
};

use crate::ui::presentation::components::SectionTitle;

#[component]
pub fn ShinobigamiSheetView(sheet: ShinobigamiSheet) -> Element {
    let school = sheet.school.clone();
    let has_school = !school.is_empty();

    rsx! {
        div {
            class: "flex flex-col gap-6",

            div {
                SectionTitle { title: "流派" }
                if has_school {
                    div {
                        class: "grid grid-cols-2 gap-3",
                        div { span { class: "text-gray-400", "流派: " } "{school}" }
                        div { span { class: "text-gray-400", "得意分野: " } "{domain_for_school(&school)}" }
                        div { span { class: "text-gray-400", "流儀: " } "{creed_for_school(&school)}" }
                        div { span { class: "text-gray-400", "仇敵: " } "{nemesis_of(&school)}" }
                    }
                } else {
                    p { class: "text-gray-400", "(未設定)" }
                }
            }

            div {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-6 gap-3",
                    for key in ShinobigamiAttributes::KEYS {
                        div {
                            key: "{key}",
                            div { class: "text-sm text-gray-400", "{key}" }
                            div { class: "text-lg font-bold", "{sheet.attributes.get(key).unwrap_or(0)}" }
                        }
                    }
                }
            }

            div {
                SectionTitle { title: "特技 ({sheet.skills.len()})" }
                if sheet.skills.is_empty() {
                    p { class: "text-gray-400", "なし" }
                } else {
                    div {
                        class: "flex flex-wrap gap-2",
                        for skill in sheet.skills.iter() {
                            span {
                                key: "{skill.name}",
                                class: "tag",
                                "{skill.name}"
                                if !skill.domain.is_empty() {
                                    span { class: "text-gray-400 text-xs", " ({skill.domain})" }
                                }
                            }
                        }
                    }
                }
            }

            if !sheet.ninpo.is_empty() {
                div {
                    SectionTitle { title: "忍法" }
                    table {
                        class: "sheet-table",
                        thead {
                            tr {
                                th { "名前" }
                                th { "タイプ" }
                                th { "指定特技" }
                                th { "間合い" }
                                th { "コスト" }
                                th { "参照ページ" }
                            }
                        }
                        tbody {
                            for (i, ninpo) in sheet.ninpo.iter().enumerate() {
                                tr {
                                    key: "{i}",
                                    td { if ninpo.name.is_empty() { "(無名の忍法)" } else { "{ninpo.name}" } }
                                    td { "{ninpo.kind}" }
                                    td { "{ninpo.skill}" }
                                    td { "{ninpo.range}" }
                                    td { "{ninpo.cost}" }
                                    td { "{ninpo.page}" }
                                }
                            }
                        }
                    }
                }
            }

            if sheet.secret_flag {
                div { class: "tag tag-warning self-start", "秘密あり" }
            }

            if !sheet.background.is_empty() {
                div {
                    SectionTitle { title: "背景" }
                    p { class: "whitespace-pre-wrap", "{sheet.background}" }
                }
            }
        }
    }
}
