//! Cthulhu investigator form
//!
//! Every change goes up as a [`CthulhuEdit`]; the page owns the draft and applies
//! it, so totals and derived values are always recomputed in one place.

use dioxus::prelude::*;
use sheetkeeper_domain::sheets::cthulhu::{
    CthulhuItem, CthulhuSheet, CthulhuSkill, CthulhuWeapon, Edition, MemoEntry, ATTRIBUTE_KEYS,
};
use sheetkeeper_domain::GameSystem;
use uuid::Uuid;

use super::fields::{
    AddRowButton, CellNumber, CellText, NumberInput, OptionalNumberInput, RemoveRowButton,
    TextArea, TextInput,
};
use crate::application::sheet_edit::cthulhu::{
    choose_specialty, memos, points, profile, skills, specialty_options, CthulhuEdit, MemoList,
    Pool, ProfileField, SkillList,
};
use crate::application::sheet_edit::{parse_number, RowOp};
use crate::ui::presentation::components::{AutoRollAttributes, SectionTitle};
use crate::ui::presentation::views::attribute_label;

const PROFILE_FIELDS: [(ProfileField, &str); 5] = [
    (ProfileField::PlayerName, "プレイヤー名"),
    (ProfileField::Occupation, "職業"),
    (ProfileField::Gender, "性別"),
    (ProfileField::Birthplace, "出身地"),
    (ProfileField::SchoolDegree, "学校・学位"),
];

#[derive(Props, Clone, PartialEq)]
pub struct CthulhuFormProps {
    pub sheet: CthulhuSheet,
    pub edition: Edition,
    pub system: GameSystem,
    #[props(default)]
    pub character_id: Option<Uuid>,
    pub on_edit: EventHandler<CthulhuEdit>,
}

#[component]
pub fn CthulhuForm(props: CthulhuFormProps) -> Element {
    let on_edit = props.on_edit;
    let sheet = &props.sheet;
    let edition = props.edition;

    rsx! {
        div {
            class: "flex flex-col gap-8",

            section {
                SectionTitle { title: "探索者情報" }
                div {
                    class: "grid grid-cols-3 gap-4",
                    for (field, label) in PROFILE_FIELDS {
                        TextInput {
                            key: "{label}",
                            label: label.to_string(),
                            value: profile(sheet, field).to_string(),
                            on_input: move |v| on_edit.call(CthulhuEdit::Profile(field, v)),
                        }
                    }
                    OptionalNumberInput {
                        label: "年齢",
                        value: sheet.age,
                        on_input: move |v| on_edit.call(CthulhuEdit::Age(v)),
                    }
                }
            }

            AutoRollAttributes {
                system: props.system,
                character_id: props.character_id,
                on_apply: move |attributes| on_edit.call(CthulhuEdit::RolledAttributes(attributes)),
            }

            section {
                SectionTitle { title: "能力値" }
                div {
                    class: "grid grid-cols-4 gap-4",
                    for key in ATTRIBUTE_KEYS {
                        NumberInput {
                            key: "{key}",
                            label: attribute_label(key).to_string(),
                            value: sheet.attributes.get(key).unwrap_or(0),
                            on_input: move |value| on_edit.call(CthulhuEdit::Attribute {
                                key: key.to_string(),
                                value,
                            }),
                        }
                    }
                    if edition == Edition::Seventh {
                        NumberInput {
                            label: attribute_label("LUK").to_string(),
                            value: sheet.attributes.luk.unwrap_or(0),
                            on_input: move |value| on_edit.call(CthulhuEdit::Attribute {
                                key: "LUK".to_string(),
                                value,
                            }),
                        }
                    }
                }
            }

            DerivedSection { sheet: sheet.clone(), edition, on_edit }

            SkillSection { sheet: sheet.clone(), edition, on_edit }

            WeaponSection { weapons: sheet.weapons.clone(), edition, on_edit }

            ItemSection { items: sheet.items.clone(), on_edit }

            section {
                SectionTitle { title: "現金・財産" }
                div {
                    class: "grid grid-cols-2 gap-4",
                    TextInput {
                        label: "現金",
                        value: sheet.cash.clone(),
                        on_input: move |v| on_edit.call(CthulhuEdit::Profile(ProfileField::Cash, v)),
                    }
                    TextInput {
                        label: "資産",
                        value: sheet.assets.clone(),
                        on_input: move |v| on_edit.call(CthulhuEdit::Profile(ProfileField::Assets, v)),
                    }
                }
            }

            for list in MemoList::ALL {
                MemoSection {
                    key: "{list.label()}",
                    list,
                    rows: memos(sheet, list).to_vec(),
                    on_edit,
                }
            }

            section {
                class: "flex flex-col gap-4",
                TextArea {
                    label: "バックストーリー",
                    value: sheet.backstory.clone(),
                    rows: 6,
                    on_input: move |v| on_edit.call(CthulhuEdit::Profile(ProfileField::Backstory, v)),
                }
                TextArea {
                    label: "その他のメモ",
                    value: sheet.notes.clone(),
                    on_input: move |v| on_edit.call(CthulhuEdit::Profile(ProfileField::Notes, v)),
                }
            }
        }
    }
}

#[component]
fn DerivedSection(sheet: CthulhuSheet, edition: Edition, on_edit: EventHandler<CthulhuEdit>) -> Element {
    let d = sheet.derived.clone();
    let pools = [
        (Pool::San, "SAN", d.san_current, d.san_max),
        (Pool::Hp, "HP", d.hp_current, d.hp_max),
        (Pool::Mp, "MP", d.mp_current, d.mp_max),
    ];
    let mut fixed: Vec<(&str, String)> = Vec::new();
    if let Some(idea) = d.idea {
        fixed.push(("アイデア", idea.to_string()));
    }
    if let Some(luck) = d.luck {
        fixed.push(("幸運", luck.to_string()));
    }
    if let Some(know) = d.know {
        fixed.push(("知識", know.to_string()));
    }
    if let Some(db) = d.db.clone() {
        fixed.push(("ダメージボーナス", db));
    }
    if edition == Edition::Seventh {
        if let Some(build) = d.build {
            fixed.push(("ビルド", build.to_string()));
        }
        if let Some(mov) = d.mov {
            fixed.push(("移動力", mov.to_string()));
        }
    }

    rsx! {
        section {
            SectionTitle { title: "派生値" }
            div {
                class: "grid grid-cols-3 gap-4",
                for (pool, name, current, max) in pools {
                    div {
                        key: "{name}",
                        label { class: "label", "{name} (最大 {max})" }
                        input {
                            r#type: "number",
                            class: "input",
                            value: "{current}",
                            oninput: move |e| on_edit.call(CthulhuEdit::Pool(pool, parse_number(&e.value()))),
                        }
                    }
                }
            }
            div {
                class: "grid grid-cols-4 gap-4 mt-4",
                for (label, value) in fixed {
                    div {
                        key: "{label}",
                        class: "stat-cell",
                        span { class: "text-sm text-gray-400", "{label}: " }
                        span { class: "font-bold", "{value}" }
                    }
                }
            }
        }
    }
}

#[component]
fn SkillSection(sheet: CthulhuSheet, edition: Edition, on_edit: EventHandler<CthulhuEdit>) -> Element {
    let summary = points(&sheet);
    let job_class = if summary.job_exceeded() { "text-red-400 font-bold" } else { "" };
    let interest_class = if summary.interest_exceeded() {
        "text-red-400 font-bold"
    } else {
        ""
    };
    let lists = [SkillList::Skills, SkillList::CombatSkills, SkillList::CustomSkills];

    rsx! {
        section {
            SectionTitle { title: "技能" }
            div {
                class: "flex gap-6 mb-4",
                span { class: job_class, "職業P: {summary.job_used} / {summary.job_limit}" }
                span { class: interest_class, "興味P: {summary.interest_used} / {summary.interest_limit}" }
            }
            for list in lists {
                SkillTable {
                    key: "{list.label()}",
                    list,
                    rows: skills(&sheet, list).to_vec(),
                    edition,
                    on_edit,
                }
            }
        }
    }
}

#[component]
fn SkillTable(
    list: SkillList,
    rows: Vec<CthulhuSkill>,
    edition: Edition,
    on_edit: EventHandler<CthulhuEdit>,
) -> Element {
    let custom = list == SkillList::CustomSkills;
    rsx! {
        div {
            class: "mb-6",
            h4 { class: "m-0 mb-2", "{list.label()}" }
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
                        if custom { th {} }
                    }
                }
                tbody {
                    for (index, skill) in rows.into_iter().enumerate() {
                        SkillRow { key: "{index}", list, index, skill, edition, on_edit }
                    }
                }
            }
            if custom {
                AddRowButton {
                    label: "技能を追加",
                    on_click: move |_| on_edit.call(CthulhuEdit::Skill(
                        list,
                        RowOp::Add(CthulhuSkill::custom("")),
                    )),
                }
            }
        }
    }
}

#[component]
fn SkillRow(
    list: SkillList,
    index: usize,
    skill: CthulhuSkill,
    edition: Edition,
    on_edit: EventHandler<CthulhuEdit>,
) -> Element {
    let update = move |next: CthulhuSkill| {
        on_edit.call(CthulhuEdit::Skill(list, RowOp::Update(index, next)));
    };
    let options = specialty_options(&skill, edition);
    let current_specialty = skill.specialty.clone().unwrap_or_default();

    let s = skill.clone();
    let set_name = move |v: String| update(CthulhuSkill { name: v, ..s.clone() });
    let s = skill.clone();
    let set_base = move |v: i32| update(CthulhuSkill { base_value: v, ..s.clone() });
    let s = skill.clone();
    let set_job = move |v: i32| update(CthulhuSkill { job_points: v, ..s.clone() });
    let s = skill.clone();
    let set_interest = move |v: i32| update(CthulhuSkill { interest_points: v, ..s.clone() });
    let s = skill.clone();
    let set_growth = move |v: i32| update(CthulhuSkill { growth: v, ..s.clone() });
    let s = skill.clone();
    let set_other = move |v: i32| update(CthulhuSkill { other: v, ..s.clone() });
    let s = skill.clone();
    let pick = move |v: String| update(choose_specialty(&s, edition, &v));

    rsx! {
        tr {
            td {
                if skill.is_custom {
                    CellText { value: skill.name.clone(), on_input: set_name }
                } else if let Some(options) = options {
                    span { "{skill.name} " }
                    select {
                        class: "input input-cell",
                        value: "{current_specialty}",
                        onchange: move |e| pick(e.value()),
                        for choice in options.iter() {
                            option { key: "{choice.value}", value: "{choice.value}", "{choice.value}" }
                        }
                    }
                } else {
                    "{skill.display_name()}"
                }
            }
            td {
                if skill.is_custom {
                    CellNumber { value: skill.base_value, on_input: set_base }
                } else {
                    "{skill.base_value}"
                }
            }
            td { CellNumber { value: skill.job_points, on_input: set_job } }
            td { CellNumber { value: skill.interest_points, on_input: set_interest } }
            td { CellNumber { value: skill.growth, on_input: set_growth } }
            td { CellNumber { value: skill.other, on_input: set_other } }
            td { class: "font-bold", "{skill.total}" }
            if skill.is_custom {
                td {
                    RemoveRowButton {
                        on_click: move |_| on_edit.call(CthulhuEdit::Skill(list, RowOp::Remove(index))),
                    }
                }
            }
        }
    }
}

#[component]
fn WeaponSection(
    weapons: Vec<CthulhuWeapon>,
    edition: Edition,
    on_edit: EventHandler<CthulhuEdit>,
) -> Element {
    let with_durability = edition == Edition::Sixth;
    rsx! {
        section {
            SectionTitle { title: "武器" }
            if !weapons.is_empty() {
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
                            if with_durability { th { "耐久力" } }
                            th {}
                        }
                    }
                    tbody {
                        for (index, weapon) in weapons.into_iter().enumerate() {
                            WeaponRow { key: "{index}", index, weapon, with_durability, on_edit }
                        }
                    }
                }
            }
            AddRowButton {
                label: "武器を追加",
                on_click: move |_| on_edit.call(CthulhuEdit::Weapon(RowOp::Add(CthulhuWeapon::default()))),
            }
        }
    }
}

#[component]
fn WeaponRow(
    index: usize,
    weapon: CthulhuWeapon,
    with_durability: bool,
    on_edit: EventHandler<CthulhuEdit>,
) -> Element {
    let update = move |next: CthulhuWeapon| on_edit.call(CthulhuEdit::Weapon(RowOp::Update(index, next)));

    let w = weapon.clone();
    let set_name = move |v: String| update(CthulhuWeapon { name: v, ..w.clone() });
    let w = weapon.clone();
    let set_value = move |v: String| update(CthulhuWeapon { value: v, ..w.clone() });
    let w = weapon.clone();
    let set_damage = move |v: String| update(CthulhuWeapon { damage: v, ..w.clone() });
    let w = weapon.clone();
    let set_range = move |v: String| update(CthulhuWeapon { range: v, ..w.clone() });
    let w = weapon.clone();
    let set_attacks = move |v: String| update(CthulhuWeapon { attacks: v, ..w.clone() });
    let w = weapon.clone();
    let set_ammo = move |v: i32| update(CthulhuWeapon { ammo: v, ..w.clone() });
    let w = weapon.clone();
    let set_malfunction = move |v: i32| update(CthulhuWeapon { malfunction: v, ..w.clone() });
    let w = weapon.clone();
    let set_durability = move |v: String| {
        update(CthulhuWeapon {
            durability: (!v.is_empty()).then_some(v),
            ..w.clone()
        })
    };

    rsx! {
        tr {
            td { CellText { value: weapon.name.clone(), on_input: set_name } }
            td { CellText { value: weapon.value.clone(), on_input: set_value } }
            td { CellText { value: weapon.damage.clone(), on_input: set_damage } }
            td { CellText { value: weapon.range.clone(), on_input: set_range } }
            td { CellText { value: weapon.attacks.clone(), on_input: set_attacks } }
            td { CellNumber { value: weapon.ammo, on_input: set_ammo } }
            td { CellNumber { value: weapon.malfunction, on_input: set_malfunction } }
            if with_durability {
                td { CellText { value: weapon.durability.clone().unwrap_or_default(), on_input: set_durability } }
            }
            td {
                RemoveRowButton {
                    on_click: move |_| on_edit.call(CthulhuEdit::Weapon(RowOp::Remove(index))),
                }
            }
        }
    }
}

#[component]
fn ItemSection(items: Vec<CthulhuItem>, on_edit: EventHandler<CthulhuEdit>) -> Element {
    rsx! {
        section {
            SectionTitle { title: "所持品" }
            for (index, item) in items.into_iter().enumerate() {
                ItemRow { key: "{index}", index, item, on_edit }
            }
            AddRowButton {
                label: "所持品を追加",
                on_click: move |_| on_edit.call(CthulhuEdit::Item(RowOp::Add(CthulhuItem::default()))),
            }
        }
    }
}

#[component]
fn ItemRow(index: usize, item: CthulhuItem, on_edit: EventHandler<CthulhuEdit>) -> Element {
    let update = move |next: CthulhuItem| on_edit.call(CthulhuEdit::Item(RowOp::Update(index, next)));
    let i = item.clone();
    let set_name = move |v: String| update(CthulhuItem { name: v, ..i.clone() });
    let i = item.clone();
    let set_quantity = move |v: i32| update(CthulhuItem { quantity: v, ..i.clone() });
    let i = item.clone();
    let set_detail = move |v: String| update(CthulhuItem { detail: v, ..i.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: item.name.clone(), on_input: set_name }
            CellNumber { value: item.quantity, on_input: set_quantity }
            CellText { value: item.detail.clone(), on_input: set_detail }
            RemoveRowButton {
                on_click: move |_| on_edit.call(CthulhuEdit::Item(RowOp::Remove(index))),
            }
        }
    }
}

#[component]
fn MemoSection(list: MemoList, rows: Vec<MemoEntry>, on_edit: EventHandler<CthulhuEdit>) -> Element {
    rsx! {
        section {
            SectionTitle { title: list.label().to_string() }
            for (index, row) in rows.into_iter().enumerate() {
                MemoRow { key: "{index}", list, index, row, on_edit }
            }
            AddRowButton {
                label: "追加",
                on_click: move |_| on_edit.call(CthulhuEdit::Memo(list, RowOp::Add(MemoEntry::default()))),
            }
        }
    }
}

#[component]
fn MemoRow(list: MemoList, index: usize, row: MemoEntry, on_edit: EventHandler<CthulhuEdit>) -> Element {
    let update = move |next: MemoEntry| on_edit.call(CthulhuEdit::Memo(list, RowOp::Update(index, next)));
    let r = row.clone();
    let set_name = move |v: String| update(MemoEntry { name: v, ..r.clone() });
    let r = row.clone();
    let set_memo = move |v: String| update(MemoEntry { memo: v, ..r.clone() });

    rsx! {
        div {
            class: "flex gap-2 items-center mb-2",
            CellText { value: row.name.clone(), on_input: set_name }
            CellText { value: row.memo.clone(), on_input: set_memo }
            RemoveRowButton {
                on_click: move |_| on_edit.call(CthulhuEdit::Memo(list, RowOp::Remove(index))),
            }
        }
    }
}
