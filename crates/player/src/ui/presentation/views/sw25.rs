//! Sword World 2.5 sheet view

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::sw25::{BaseAttributeValues, Sw25Sheet};

use crate::ui::presentation::components::SectionTitle;

/// Ability paired with each base attribute, in `BaseAttributeValues::KEYS` order.
const PAIRED_ABILITY: [&str; 6] = ["技", "技", "体", "体", "心", "心"];

/// Attribute bonus: value / 6, rounded down.
pub fn attribute_bonus(value: i32) -> i32 {
    value.div_euclid(6)
}

fn or_dash(value: Option<i32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

#[component]
pub fn Sw25SheetView(sheet: Sw25Sheet) -> Element {
    let base = sheet.attributes.base.to_array();
    let initials = sheet.attribute_initials.to_array();
    let growth = sheet.attribute_growth.to_array();
    let abilities = [sheet.abilities.gi, sheet.abilities.tai, sheet.abilities.shin];

    let profile: Vec<(&str, String)> = [
        ("キャラクター名", sheet.character_name.clone()),
        ("プレイヤー名", sheet.player_name.clone()),
        ("種族", sheet.race.clone().unwrap_or_default()),
        ("生まれ", sheet.birth.clone().unwrap_or_default()),
        ("年齢", sheet.age.map(|a| a.to_string()).unwrap_or_default()),
        ("性別", sheet.gender.clone()),
    ]
    .into_iter()
    .filter(|(_, v)| !v.is_empty())
    .collect();

    let has_equipment =
        !sheet.weapons.is_empty() || !sheet.armors.is_empty() || !sheet.accessories.is_empty();

    rsx! {
        div {
            class: "flex flex-col gap-6",

            if !profile.is_empty() {
                div {
                    class: "grid grid-cols-3 gap-3",
                    for (label, value) in profile {
                        div {
                            key: "{label}",
                            div { class: "text-sm text-gray-400", "{label}" }
                            div { class: "font-bold", "{value}" }
                        }
                    }
                }
            }

            div {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-3 gap-3 mb-3",
                    div { span { class: "text-gray-400", "技: " } "{abilities[0]}" }
                    div { span { class: "text-gray-400", "体: " } "{abilities[1]}" }
                    div { span { class: "text-gray-400", "心: " } "{abilities[2]}" }
                }
                table {
                    class: "sheet-table",
                    thead {
                        tr {
                            th { "能力値" }
                            th { "基本能力" }
                            th { "初期値" }
                            th { "成長値" }
                            th { "合計" }
                            th { "能力値ボーナス" }
                        }
                    }
                    tbody {
                        for (i, key) in BaseAttributeValues::KEYS.iter().enumerate() {
                            tr {
                                key: "{key}",
                                td { "{key}" }
                                td { "{PAIRED_ABILITY[i]}" }
                                td { "{initials[i]}" }
                                td { "{growth[i]}" }
                                td { class: "font-bold", "{base[i]}" }
                                td { "{attribute_bonus(base[i])}" }
                            }
                        }
                    }
                }
                div {
                    class: "grid grid-cols-4 gap-3 mt-3",
                    div { span { class: "text-gray-400", "HP: " } "{sheet.attributes.hp}" }
                    div { span { class: "text-gray-400", "MP: " } "{sheet.attributes.mp}" }
                    div { span { class: "text-gray-400", "生命抵抗力: " } "{sheet.attributes.vitality_resistance}" }
                    div { span { class: "text-gray-400", "精神抵抗力: " } "{sheet.attributes.mental_resistance}" }
                }
            }

            div {
                SectionTitle { title: "技能" }
                p { span { class: "text-gray-400", "冒険者レベル: " } "{or_dash(sheet.adventurer_level)}" }
                if !sheet.classes.is_empty() {
                    ul {
                        for (i, class) in sheet.classes.iter().enumerate() {
                            li { key: "{i}", "{class.name} Lv.{class.level}" }
                        }
                    }
                }
                div {
                    class: "grid grid-cols-4 gap-3 mt-2 text-sm",
                    div { span { class: "text-gray-400", "初期経験点: " } "{sheet.initial_experience_points}" }
                    div { span { class: "text-gray-400", "獲得経験点: " } "{or_dash(sheet.gained_experience_points)}" }
                    div { span { class: "text-gray-400", "経験点: " } "{or_dash(sheet.experience_points)}" }
                    div { span { class: "text-gray-400", "名誉点: " } "{or_dash(sheet.honor_points)}" }
                }
            }

            if !sheet.skills.is_empty() {
                div {
                    SectionTitle { title: "戦闘特技" }
                    ul {
                        for (i, skill) in sheet.skills.iter().enumerate() {
                            li {
                                key: "{i}",
                                span { class: "font-bold", "{skill.name}" }
                                if !skill.effect.is_empty() {
                                    span { class: "text-gray-400", " {skill.effect}" }
                                }
                            }
                        }
                    }
                }
            }

            if !sheet.magics.is_empty() {
                div {
                    SectionTitle { title: "魔法" }
                    ul {
                        for (i, magic) in sheet.magics.iter().enumerate() {
                            li {
                                key: "{i}",
                                span { class: "font-bold", "{magic.name}" }
                                " ({magic.system}) MP{magic.cost}"
                                if !magic.effect.is_empty() {
                                    span { class: "text-gray-400", " {magic.effect}" }
                                }
                            }
                        }
                    }
                }
            }

            if has_equipment {
                div {
                    SectionTitle { title: "装備" }
                    ul {
                        for (i, weapon) in sheet.weapons.iter().enumerate() {
                            li { key: "w{i}", "{weapon.name} 命中力: {weapon.hit} ダメージ: {weapon.damage}" }
                        }
                        for (i, armor) in sheet.armors.iter().enumerate() {
                            li { key: "a{i}", "{armor.name} 防護点: {armor.defense}" }
                        }
                        for (i, accessory) in sheet.accessories.iter().enumerate() {
                            li {
                                key: "x{i}",
                                "{accessory.name}"
                                if let Some(slot) = accessory.slot.as_ref() {
                                    " [{slot}]"
                                }
                                if !accessory.effect.is_empty() {
                                    span { class: "text-gray-400", " {accessory.effect}" }
                                }
                            }
                        }
                    }
                }
            }

            if !sheet.items.is_empty() || sheet.money.is_some() {
                div {
                    SectionTitle { title: "所持品" }
                    if let Some(money) = sheet.money {
                        p { span { class: "text-gray-400", "所持金: " } "{money}G" }
                    }
                    ul {
                        for (i, item) in sheet.items.iter().enumerate() {
                            li { key: "{i}", "{item.name} ×{item.quantity}" }
                        }
                    }
                }
            }

            if !sheet.languages.is_empty() {
                div {
                    SectionTitle { title: "言語" }
                    table {
                        class: "sheet-table",
                        thead { tr { th { "言語" } th { "会話" } th { "読文" } } }
                        tbody {
                            for (i, lang) in sheet.languages.iter().enumerate() {
                                tr {
                                    key: "{i}",
                                    td { "{lang.name}" }
                                    td { if lang.speak { "○" } else { "-" } }
                                    td { if lang.read { "○" } else { "-" } }
                                }
                            }
                        }
                    }
                }
            }

            if !sheet.background.is_empty() {
                div {
                    SectionTitle { title: "経歴" }
                    p { class: "whitespace-pre-wrap", "{sheet.background}" }
                }
            }
            if !sheet.memo.is_empty() {
                div {
                    SectionTitle { title: "メモ" }
                    p { class: "whitespace-pre-wrap", "{sheet.memo}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bonus_rounds_down() {
        assert_eq!(attribute_bonus(0), 0);
        assert_eq!(attribute_bonus(5), 0);
        assert_eq!(attribute_bonus(6), 1);
        assert_eq!(attribute_bonus(17), 2);
        assert_eq!(attribute_bonus(18), 3);
    }
}
