//! Cthulhu sheet view: profile header plus four tabs
//!
//! Only skills whose total differs from their base are listed, custom skills
//! always are, and empty sections are left out.

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::cthulhu::{
    CthulhuAttributes, CthulhuSheet, CthulhuSkill, Edition, MemoEntry, ATTRIBUTE_KEYS,
};

use crate::application::sheet_edit::cthulhu::{memos, MemoList};
use crate::ui::presentation::components::{SectionTitle, TabBar};

const TABS: [&str; 4] = ["能力値・派生値", "技能・格闘技能", "武器・所持品", "背景・その他"];

pub fn attribute_label(key: &str) -> &'static str {
    match key {
        "STR" => "STR (筋力)",
        "CON" => "CON (体力)",
        "POW" => "POW (精神力)",
        "DEX" => "DEX (敏捷性)",
        "APP" => "APP (外見)",
        "SIZ" => "SIZ (体格)",
        "INT" => "INT (知性)",
        "EDU" => "EDU (教育)",
        "LUK" => "LUK (幸運)",
        _ => "",
    }
}

/// Skills worth listing: changed ones from a default list.
fn changed(
    skills: &[CthulhuSkill],
    edition: Edition,
    attributes: &CthulhuAttributes,
) -> Vec<CthulhuSkill> {
    skills
        .iter()
        .filter(|s| s.is_changed(edition, attributes))
        .cloned()
        .collect()
}

#[component]
pub fn CthulhuSheetView(sheet: CthulhuSheet, edition: Edition) -> Element {
    let active = use_signal(|| 0usize);
    let tab = *active.read();

    rsx! {
        div {
            class: "flex flex-col gap-4",
            ProfileSummary { sheet: sheet.clone() }
            TabBar { labels: TABS.to_vec(), active }
            match tab {
                0 => rsx! { AttributesTab { sheet: sheet.clone(), edition } },
                1 => rsx! { SkillsTab { sheet: sheet.clone(), edition } },
                2 => rsx! { EquipmentTab { sheet: sheet.clone() } },
                _ => rsx! { BackgroundTab { sheet: sheet.clone() } },
            }
        }
    }
}

#[component]
fn ProfileSummary(sheet: CthulhuSheet) -> Element {
    let age = sheet.age.map(|a| a.to_string()).unwrap_or_default();
    let fields = [
        ("プレイヤー名", sheet.player_name.as_str()),
        ("職業", sheet.occupation.as_str()),
        ("年齢", age.as_str()),
        ("性別", sheet.gender.as_str()),
        ("出身地", sheet.birthplace.as_str()),
        ("学校・学位", sheet.school_degree.as_str()),
    ];
    let filled: Vec<(&str, String)> = fields
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .map(|(k, v)| (k, v.to_string()))
        .collect();

    if filled.is_empty() {
        return rsx! {};
    }
    rsx! {
        div {
            class: "grid grid-cols-3 gap-3",
            for (label, value) in filled {
                div {
                    key: "{label}",
                    div { class: "text-sm text-gray-400", "{label}" }
                    div { class: "font-bold", "{value}" }
                }
            }
        }
    }
}

#[component]
fn AttributesTab(sheet: CthulhuSheet, edition: Edition) -> Element {
    let d = &sheet.derived;
    let mut derived: Vec<(&str, String)> = vec![
        ("SAN (現在)", d.san_current.to_string()),
        ("SAN (最大)", d.san_max.to_string()),
        ("HP (現在)", d.hp_current.to_string()),
        ("HP (最大)", d.hp_max.to_string()),
        ("MP (現在)", d.mp_current.to_string()),
        ("MP (最大)", d.mp_max.to_string()),
    ];
    if let Some(idea) = d.idea {
        derived.push(("アイデア", idea.to_string()));
    }
    if let Some(luck) = d.luck {
        derived.push(("幸運", luck.to_string()));
    }
    if let Some(know) = d.know {
        derived.push(("知識", know.to_string()));
    }
    if let Some(db) = d.db.as_ref() {
        derived.push(("ダメージボーナス", db.clone()));
    }
    if edition == Edition::Seventh {
        if let Some(build) = d.build {
            derived.push(("ビルド", build.to_string()));
        }
        if let Some(mov) = d.mov {
            derived.push(("移動力", mov.to_string()));
        }
    }

    rsx! {
        div {
            class: "flex flex-col gap-6",
            div {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-4 gap-4",
                    for key in ATTRIBUTE_KEYS {
                        div {
                            key: "{key}",
                            div { class: "text-sm text-gray-400", "{attribute_label(key)}" }
                            div { class: "text-lg font-bold", "{sheet.attributes.get(key).unwrap_or(0)}" }
                        }
                    }
                }
            }
            div {
                SectionTitle { title: "派生値" }
                div {
                    class: "grid grid-cols-4 gap-4",
                    for (label, value) in derived {
                        div {
                            key: "{label}",
                            div { class: "text-sm text-gray-400", "{label}" }
                            div { class: "text-lg font-bold", "{value}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SkillsTab(sheet: CthulhuSheet, edition: Edition) -> Element {
    let listed: Vec<CthulhuSkill> = changed(&sheet.skills, edition, &sheet.attributes)
        .into_iter()
        .chain(sheet.custom_skills.iter().cloned())
        .collect();
    let combat = changed(&sheet.combat_skills, edition, &sheet.attributes);

    if listed.is_empty() && combat.is_empty() {
        return rsx! {
            p { class: "text-gray-400", "初期値から変更した技能はありません" }
        };
    }
    rsx! {
        div {
            class: "flex flex-col gap-6",
            if !listed.is_empty() {
                SkillTable { title: "技能", skills: listed }
            }
            if !combat.is_empty() {
                SkillTable { title: "格闘技能", skills: combat }
            }
        }
    }
}

#[component]
fn SkillTable(title: String, skills: Vec<CthulhuSkill>) -> Element {
    rsx! {
        div {
            SectionTitle { title }
            table {
                class: "sheet-table",
                thead {
                    tr {
                        th { "技能名" }
                        th { "初期値" }
                        th { "職業P" }
                        th { "興味P" }
                        th { "成長" }
                        th { "その他" }
                        th { "合計" }
                    }
                }
                tbody {
                    for (i, skill) in skills.iter().enumerate() {
                        tr {
                            key: "{i}",
                            td {
                                if skill.name.is_empty() { "(無名)" } else { "{skill.display_name()}" }
                            }
                            td { "{skill.base_value}" }
                            td { "{skill.job_points}" }
                            td { "{skill.interest_points}" }
                            td { "{skill.growth}" }
                            td { "{skill.other}" }
                            td { class: "font-bold", "{skill.total}" }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn EquipmentTab(sheet: CthulhuSheet) -> Element {
    let has_property = !sheet.cash.is_empty() || !sheet.assets.is_empty();
    if sheet.weapons.is_empty() && sheet.items.is_empty() && !has_property {
        return rsx! {
            p { class: "text-gray-400", "なし" }
        };
    }
    rsx! {
        div {
            class: "flex flex-col gap-6",
            if !sheet.weapons.is_empty() {
                div {
                    SectionTitle { title: "武器" }
                    table {
                        class: "sheet-table",
                        thead {
                            tr {
                                th { "名前" }
                                th { "技能値" }
                                th { "ダメージ" }
                                th { "射程" }
                                th { "攻撃回数" }
                                th { "装弾数" }
                                th { "故障" }
                                th { "耐久力" }
                            }
                        }
                        tbody {
                            for (i, w) in sheet.weapons.iter().enumerate() {
                                tr {
                                    key: "{i}",
                                    td { if w.name.is_empty() { "(無名の武器)" } else { "{w.name}" } }
                                    td { "{w.value}" }
                                    td { "{w.damage}" }
                                    td { "{w.range}" }
                                    td { "{w.attacks}" }
                                    td { "{w.ammo}" }
                                    td { "{w.malfunction}" }
                                    td { "{w.durability.clone().unwrap_or_default()}" }
                                }
                            }
                        }
                    }
                }
            }
            if !sheet.items.is_empty() {
                div {
                    SectionTitle { title: "所持品" }
                    ul {
                        class: "flex flex-col gap-1",
                        for (i, item) in sheet.items.iter().enumerate() {
                            li {
                                key: "{i}",
                                span { class: "font-bold",
                                    if item.name.is_empty() { "(無名のアイテム)" } else { "{item.name}" }
                                }
                                " ×{item.quantity}"
                                if !item.detail.is_empty() {
                                    span { class: "text-gray-400", " {item.detail}" }
                                }
                            }
                        }
                    }
                }
            }
            if has_property {
                div {
                    SectionTitle { title: "現金・財産" }
                    if !sheet.cash.is_empty() {
                        p { span { class: "text-gray-400", "現金: " } "{sheet.cash}" }
                    }
                    if !sheet.assets.is_empty() {
                        p { span { class: "text-gray-400", "資産: " } "{sheet.assets}" }
                    }
                }
            }
        }
    }
}

#[component]
fn BackgroundTab(sheet: CthulhuSheet) -> Element {
    let lists: Vec<(&'static str, Vec<MemoEntry>)> = MemoList::ALL
        .iter()
        .map(|list| (list.label(), memos(&sheet, *list).to_vec()))
        .filter(|(_, rows)| !rows.is_empty())
        .collect();

    if lists.is_empty() && sheet.backstory.is_empty() && sheet.notes.is_empty() {
        return rsx! {
            p { class: "text-gray-400", "なし" }
        };
    }
    rsx! {
        div {
            class: "flex flex-col gap-6",
            for (label, rows) in lists {
                div {
                    key: "{label}",
                    SectionTitle { title: "{label}" }
                    ul {
                        for (i, row) in rows.iter().enumerate() {
                            li {
                                key: "{i}",
                                span { class: "font-bold", "{row.name}" }
                                if !row.memo.is_empty() {
                                    span { class: "text-gray-400", " {row.memo}" }
                                }
                            }
                        }
                    }
                }
            }
            if !sheet.backstory.is_empty() {
                div {
                    SectionTitle { title: "バックストーリー" }
                    p { class: "whitespace-pre-wrap", "{sheet.backstory}" }
                }
            }
            if !sheet.notes.is_empty() {
                div {
                    SectionTitle { title: "その他のメモ" }
                    p { class: "whitespace-pre-wrap", "{sheet.notes}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luck_has_a_label_but_is_not_in_the_grid() {
        assert!(!ATTRIBUTE_KEYS.contains(&"LUK"));
        for key in ATTRIBUTE_KEYS {
            assert!(attribute_label(key).starts_with(key));
        }
    }

    #[test]
    fn unchanged_default_skills_are_hidden() {
        let mut sheet = CthulhuSheet::with_default_skills(Edition::Sixth);
        assert!(changed(&sheet.skills, Edition::Sixth, &sheet.attributes).is_empty());

        sheet.skills[1].job_points = 40;
        sheet.recompute_skill_totals(Edition::Sixth);
        let shown = changed(&sheet.skills, Edition::Sixth, &sheet.attributes);
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].name, "医学");
        assert_eq!(shown[0].total, 45);
    }
}
