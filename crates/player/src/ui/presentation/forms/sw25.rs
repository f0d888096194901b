//! Sword World 2.5 form

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::sw25::{
    births_for_race, classes_in, BaseAttributeValues, ClassCategory, Sw25Accessory, Sw25Armor,
    Sw25Class, Sw25Item, Sw25Language, Sw25Magic, Sw25Sheet, Sw25Skill, Sw25Weapon, RACES,
};

use super::fields::{
    AddRowButton, CellNumber, CellText, NumberInput, OptionalNumberInput, RemoveRowButton,
    TextArea, TextInput,
};
use crate::application::sheet_edit::sw25::{
    number, roll_initials, Ability, NumberField, Sw25Edit, TextField,
};
use crate::application::sheet_edit::RowOp;
use crate::ports::outbound::PlatformPort;
use crate::ui::use_platform;
use crate::ui::presentation::components::SectionTitle;
use crate::ui::presentation::views::attribute_bonus;

const CATEGORIES: [ClassCategory; 3] =
    [ClassCategory::Warrior, ClassCategory::Magic, ClassCategory::Other];

const NUMBER_FIELDS: [(NumberField, &str); 5] = [
    (NumberField::InitialExperience, "初期経験点"),
    (NumberField::GainedExperience, "獲得経験点"),
    (NumberField::Experience, "経験点"),
    (NumberField::Honor, "名誉点"),
    (NumberField::Money, "所持金"),
];

fn none_if_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[component]
pub fn Sw25Form(sheet: Sw25Sheet, on_edit: EventHandler<Sw25Edit>) -> Element {
    let platform = use_platform();
    let race = sheet.race.clone().unwrap_or_default();
    let birth = sheet.birth.clone().unwrap_or_default();
    let births = births_for_race(&race);

    let rolled_from = sheet.clone();
    let roll = move |_: MouseEvent| {
        let edit = roll_initials(&rolled_from, |sides| {
            platform.random_range(1, i32::from(sides)).clamp(1, i32::from(sides)) as u16
        });
        tracing::debug!("Rolled SW2.5 initials");
        on_edit.call(edit);
    };

    let initials = sheet.attribute_initials.to_array();
    let growth = sheet.attribute_growth.to_array();
    let totals = sheet.attributes.base.to_array();

    rsx! {
        div {
            class: "flex flex-col gap-8",

            section {
                SectionTitle { title: "基本情報" }
                div {
                    class: "grid grid-cols-3 gap-4",
                    TextInput {
                        label: "キャラクター名",
                        value: sheet.character_name.clone(),
                        on_input: move |v| on_edit.call(Sw25Edit::Text(TextField::CharacterName, v)),
                    }
                    TextInput {
                        label: "プレイヤー名",
                        value: sheet.player_name.clone(),
                        on_input: move |v| on_edit.call(Sw25Edit::Text(TextField::PlayerName, v)),
                    }
                    TextInput {
                        label: "性別",
                        value: sheet.gender.clone(),
                        on_input: move |v| on_edit.call(Sw25Edit::Text(TextField::Gender, v)),
                    }
                    OptionalNumberInput {
                        label: "年齢",
                        value: sheet.age,
                        on_input: move |v| on_edit.call(Sw25Edit::Number(NumberField::Age, v)),
                    }
                    div {
                        label { class: "label", "種族" }
                        select {
                            class: "input",
                            value: "{race}",
                            onchange: move |e| on_edit.call(Sw25Edit::Race(none_if_empty(e.value()))),
                            option { value: "", "(選択してください)" }
                            for r in RACES.iter() {
                                option { key: "{r.name}", value: "{r.name}", "{r.name}" }
                            }
                        }
                    }
                    div {
                        label { class: "label", "生まれ" }
                        select {
                            class: "input",
                            value: "{birth}",
                            disabled: births.is_empty(),
                            onchange: move |e| on_edit.call(Sw25Edit::Birth(none_if_empty(e.value()))),
                            option { value: "", "(選択してください)" }
                            for b in births.iter() {
                                option { key: "{b}", value: "{b}", "{b}" }
                            }
                        }
                    }
                }
            }

            section {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-3 gap-4 mb-4",
                    for ability in Ability::ALL {
                        NumberInput {
                            key: "{ability.label()}",
                            label: ability.label().to_string(),
                            value: ability.get(&sheet),
                            on_input: move |v| on_edit.call(Sw25Edit::Ability(ability, v)),
                        }
                    }
                }
                button {
                    r#type: "button",
                    class: "btn btn-secondary mb-2",
                    disabled: race.is_empty(),
                    onclick: roll,
                    "初期値をダイスで決定"
                }
                table {
                    class: "sheet-table",
                    thead {
                        tr {
                            th { "能力値" }
                            th { "初期値" }
                            th { "成長値" }
                            th { "合計" }
                            th { "能力値ボーナス" }
                        }
                    }
                    tbody {
                        for (i, key) in BaseAttributeValues::KEYS.iter().copied().enumerate() {
                            tr {
                                key: "{key}",
                                td { "{key}" }
                                td {
                                    CellNumber {
                                        value: initials[i],
                                        on_input: move |value| on_edit.call(Sw25Edit::Initial {
                                            key: key.to_string(),
                                            value,
                                        }),
                                    }
                                }
                                td {
                                    CellNumber {
                                        value: growth[i],
                                        on_input: move |value| on_edit.call(Sw25Edit::Growth {
                                            key: key.to_string(),
                                            value,
                                        }),
                                    }
                                }
                                td { class: "font-bold", "{totals[i]}" }
                                td { "{attribute_bonus(totals[i])}" }
                            }
                        }
                    }
                }
                div {
                    class: "grid grid-cols-4 gap-3 mt-3",
                    div { class: "stat-cell", "HP: {sheet.attributes.hp}" }
                    div { class: "stat-cell", "MP: {sheet.attributes.mp}" }
                    div { class: "stat-cell", "生命抵抗力: {sheet.attributes.vitality_resistance}" }
                    div { class: "stat-cell", "精神抵抗力: {sheet.attributes.mental_resistance}" }
                }
            }

            section {
                SectionTitle { title: "技能" }
                p {
                    span { class: "text-gray-400", "冒険者レベル: " }
                    "{sheet.adventurer_level.unwrap_or(0)}"
                }
                for (index, class) in sheet.classes.iter().cloned().enumerate() {
                    ClassRow { key: "{index}", index, class, on_edit }
                }
                AddRowButton {
                    label: "技能を追加",
                    on_click: move |_| on_edit.call(Sw25Edit::Class(RowOp::Add(Sw25Class {
                        name: String::new(),
                        level: 1,
                    }))),
                }
                div {
                    class: "grid grid-cols-5 gap-3 mt-4",
                    for (field, label) in NUMBER_FIELDS {
                        OptionalNumberInput {
                            key: "{label}",
                            label: label.to_string(),
                            value: number(&sheet, field),
                            on_input: move |v| on_edit.call(Sw25Edit::Number(field, v)),
                        }
                    }
                }
            }

            ListSection {
                title: "戦闘特技",
                add_label: "戦闘特技を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Skill(RowOp::Add(Sw25Skill::default()))),
                for (index, row) in sheet.skills.iter().cloned().enumerate() {
                    SkillRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "魔法",
                add_label: "魔法を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Magic(RowOp::Add(Sw25Magic::default()))),
                for (index, row) in sheet.magics.iter().cloned().enumerate() {
                    MagicRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "武器",
                add_label: "武器を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Weapon(RowOp::Add(Sw25Weapon::default()))),
                for (index, row) in sheet.weapons.iter().cloned().enumerate() {
                    WeaponRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "防具",
                add_label: "防具を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Armor(RowOp::Add(Sw25Armor::default()))),
                for (index, row) in sheet.armors.iter().cloned().enumerate() {
                    ArmorRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "装飾品",
                add_label: "装飾品を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Accessory(RowOp::Add(Sw25Accessory::default()))),
                for (index, row) in sheet.accessories.iter().cloned().enumerate() {
                    AccessoryRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "所持品",
                add_label: "所持品を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Item(RowOp::Add(Sw25Item {
                    quantity: 1,
                    ..Sw25Item::default()
                }))),
                for (index, row) in sheet.items.iter().cloned().enumerate() {
                    ItemRow { key: "{index}", index, row, on_edit }
                }
            }

            ListSection {
                title: "言語",
                add_label: "言語を追加",
                on_add: move |_| on_edit.call(Sw25Edit::Language(RowOp::Add(Sw25Language::default()))),
                for (index, row) in sheet.languages.iter().cloned().enumerate() {
                    LanguageRow { key: "{index}", index, row, on_edit }
                }
            }

            section {
                class: "flex flex-col gap-4",
                TextArea {
                    label: "経歴",
                    value: sheet.background.clone(),
                    on_input: move |v| on_edit.call(Sw25Edit::Text(TextField::Background, v)),
                }
                TextArea {
                    label: "メモ",
                    value: sheet.memo.clone(),
                    on_input: move |v| on_edit.call(Sw25Edit::Text(TextField::Memo, v)),
                }
            }
        }
    }
}

#[component]
fn ListSection(
    title: String,
    add_label: String,
    on_add: EventHandler<()>,
    children: Element,
) -> Element {
    rsx! {
        section {
            SectionTitle { title }
            {children}
            AddRowButton { label: add_label, on_click: on_add }
        }
    }
}

#[component]
fn ClassRow(index: usize, class: Sw25Class, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Class| on_edit.call(Sw25Edit::Class(RowOp::Update(index, next)));
    let c = class.clone();
    let set_name = move |v: String| update(Sw25Class { name: v, ..c.clone() });
    let c = class.clone();
    let set_level = move |v: i32| update(Sw25Class { level: v, ..c.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            select {
                class: "input",
                value: "{class.name}",
                onchange: move |e| set_name(e.value()),
                option { value: "", "(選択してください)" }
                for category in CATEGORIES {
                    optgroup {
                        key: "{category.label()}",
                        label: category.label(),
                        for info in classes_in(category) {
                            option { key: "{info.name}", value: "{info.name}", "{info.name}" }
                        }
                    }
                }
            }
            CellNumber { value: class.level, on_input: set_level }
            RemoveRowButton {
                on_click: move |_| on_edit.call(Sw25Edit::Class(RowOp::Remove(index))),
            }
        }
    }
}

#[component]
fn SkillRow(index: usize, row: Sw25Skill, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Skill| on_edit.call(Sw25Edit::Skill(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Skill { name: v, ..r.clone() });
    let r = row.clone();
    let set_effect = move |v: String| update(Sw25Skill { effect: v, ..r.clone() });
    let r = row.clone();
    let set_memo = move |v: String| update(Sw25Skill { memo: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            CellText { value: row.effect.clone(), on_input: set_effect }
            CellText { value: row.memo.clone(), on_input: set_memo }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Skill(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn MagicRow(index: usize, row: Sw25Magic, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Magic| on_edit.call(Sw25Edit::Magic(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Magic { name: v, ..r.clone() });
    let r = row.clone();
    let set_system = move |v: String| update(Sw25Magic { system: v, ..r.clone() });
    let r = row.clone();
    let set_cost = move |v: i32| update(Sw25Magic { cost: v, ..r.clone() });
    let r = row.clone();
    let set_effect = move |v: String| update(Sw25Magic { effect: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            CellText { value: row.system.clone(), on_input: set_system }
            CellNumber { value: row.cost, on_input: set_cost }
            CellText { value: row.effect.clone(), on_input: set_effect }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Magic(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn WeaponRow(index: usize, row: Sw25Weapon, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Weapon| on_edit.call(Sw25Edit::Weapon(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Weapon { name: v, ..r.clone() });
    let r = row.clone();
    let set_hit = move |v: i32| update(Sw25Weapon { hit: v, ..r.clone() });
    let r = row.clone();
    let set_damage = move |v: String| update(Sw25Weapon { damage: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            span { class: "text-sm text-gray-400", "命中力" }
            CellNumber { value: row.hit, on_input: set_hit }
            span { class: "text-sm text-gray-400", "ダメージ" }
            CellText { value: row.damage.clone(), on_input: set_damage }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Weapon(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn ArmorRow(index: usize, row: Sw25Armor, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Armor| on_edit.call(Sw25Edit::Armor(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Armor { name: v, ..r.clone() });
    let r = row.clone();
    let set_defense = move |v: i32| update(Sw25Armor { defense: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            span { class: "text-sm text-gray-400", "防護点" }
            CellNumber { value: row.defense, on_input: set_defense }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Armor(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn AccessoryRow(index: usize, row: Sw25Accessory, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update =
        move |next: Sw25Accessory| on_edit.call(Sw25Edit::Accessory(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Accessory { name: v, ..r.clone() });
    let r = row.clone();
    let set_slot = move |v: String| update(Sw25Accessory { slot: none_if_empty(v), ..r.clone() });
    let r = row.clone();
    let set_effect = move |v: String| update(Sw25Accessory { effect: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            CellText { value: row.slot.clone().unwrap_or_default(), on_input: set_slot }
            CellText { value: row.effect.clone(), on_input: set_effect }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Accessory(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn ItemRow(index: usize, row: Sw25Item, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update = move |next: Sw25Item| on_edit.call(Sw25Edit::Item(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Item { name: v, ..r.clone() });
    let r = row.clone();
    let set_quantity = move |v: i32| update(Sw25Item { quantity: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            CellNumber { value: row.quantity, on_input: set_quantity }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Item(RowOp::Remove(index))) }
        }
    }
}

#[component]
fn LanguageRow(index: usize, row: Sw25Language, on_edit: EventHandler<Sw25Edit>) -> Element {
    let update =
        move |next: Sw25Language| on_edit.call(Sw25Edit::Language(RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(Sw25Language { name: v, ..r.clone() });
    let r = row.clone();
    let set_speak = move |v: bool| update(Sw25Language { speak: v, ..r.clone() });
    let r = row.clone();
    let set_read = move |v: bool| update(Sw25Language { read: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            label {
                class: "flex items-center gap-1",
                input {
                    r#type: "checkbox",
                    checked: row.speak,
                    onchange: move |e| set_speak(e.checked()),
                }
                "会話"
            }
            label {
                class: "flex items-center gap-1",
                input {
                    r#type: "checkbox",
                    checked: row.read,
                    onchange: move |e| set_read(e.checked()),
                }
                "読文"
            }
            RemoveRowButton { on_click: move |_| on_edit.call(Sw25Edit::Language(RowOp::Remove(index))) }
        }
    }
}
