//! Cthulhu sheet edits.

use sheetkeeper_domain::sheets::cthulhu::{
    compute_derived, skill_point_summary, BaseOption, CthulhuAttributes, CthulhuItem,
    CthulhuSheet, CthulhuSkill, CthulhuWeapon, Edition, MemoEntry, SkillPointSummary,
    MELEE_OPTIONS_7E, RANGED_OPTIONS_7E,
};

use super::RowOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    San,
    Hp,
    Mp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    PlayerName,
    Occupation,
    Gender,
    Birthplace,
    SchoolDegree,
    Cash,
    Assets,
    Backstory,
    Notes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillList {
    Skills,
    CombatSkills,
    CustomSkills,
}

impl SkillList {
    pub fn label(&self) -> &'static str {
        match self {
            SkillList::Skills => "技能",
            SkillList::CombatSkills => "格闘技能",
            SkillList::CustomSkills => "追加技能",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoList {
    Scenarios,
    MythosBooks,
    Spells,
    Artifacts,
    EncounteredEntities,
}

impl MemoList {
    pub const ALL: [MemoList; 5] = [
        MemoList::Scenarios,
        MemoList::MythosBooks,
        MemoList::Spells,
        MemoList::Artifacts,
        MemoList::EncounteredEntities,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MemoList::Scenarios => "通過したシナリオ",
            MemoList::MythosBooks => "魔導書",
            MemoList::Spells => "呪文",
            MemoList::Artifacts => "アーティファクト",
            MemoList::EncounteredEntities => "遭遇した超自然の存在",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CthulhuEdit {
    Attribute { key: String, value: i32 },
    /// Auto-rolled characteristics. Current pools restart at their new max.
    RolledAttributes(CthulhuAttributes),
    Pool(Pool, i32),
    Profile(ProfileField, String),
    Age(Option<i32>),
    Skill(SkillList, RowOp<CthulhuSkill>),
    Weapon(RowOp<CthulhuWeapon>),
    Item(RowOp<CthulhuItem>),
    Memo(MemoList, RowOp<MemoEntry>),
}

pub fn apply(sheet: &mut CthulhuSheet, edition: Edition, edit: CthulhuEdit) {
    match edit {
        CthulhuEdit::Attribute { key, value } => sheet.update_attribute(edition, &key, value),
        CthulhuEdit::RolledAttributes(attributes) => {
            sheet.attributes = attributes;
            sheet.derived = compute_derived(edition, &attributes);
            sheet.recompute_skill_totals(edition);
        }
        CthulhuEdit::Pool(pool, value) => match pool {
            Pool::San => sheet.derived.san_current = value,
            Pool::Hp => sheet.derived.hp_current = value,
            Pool::Mp => sheet.derived.mp_current = value,
        },
        CthulhuEdit::Profile(field, value) => *profile_mut(sheet, field) = value,
        CthulhuEdit::Age(age) => sheet.age = age,
        CthulhuEdit::Skill(list, op) => {
            let rows = match list {
                SkillList::Skills => &mut sheet.skills,
                SkillList::CombatSkills => &mut sheet.combat_skills,
                SkillList::CustomSkills => &mut sheet.custom_skills,
            };
            op.apply(rows);
            sheet.recompute_skill_totals(edition);
        }
        CthulhuEdit::Weapon(op) => op.apply(&mut sheet.weapons),
        CthulhuEdit::Item(op) => op.apply(&mut sheet.items),
        CthulhuEdit::Memo(list, op) => op.apply(memos_mut(sheet, list)),
    }
}

pub fn profile(sheet: &CthulhuSheet, field: ProfileField) -> &str {
    match field {
        ProfileField::PlayerName => &sheet.player_name,
        ProfileField::Occupation => &sheet.occupation,
        ProfileField::Gender => &sheet.gender,
        ProfileField::Birthplace => &sheet.birthplace,
        ProfileField::SchoolDegree => &sheet.school_degree,
        ProfileField::Cash => &sheet.cash,
        ProfileField::Assets => &sheet.assets,
        ProfileField::Backstory => &sheet.backstory,
        ProfileField::Notes => &sheet.notes,
    }
}

fn profile_mut(sheet: &mut CthulhuSheet, field: ProfileField) -> &mut String {
    match field {
        ProfileField::PlayerName => &mut sheet.player_name,
        ProfileField::Occupation => &mut sheet.occupation,
        ProfileField::Gender => &mut sheet.gender,
        ProfileField::Birthplace => &mut sheet.birthplace,
        ProfileField::SchoolDegree => &mut sheet.school_degree,
        ProfileField::Cash => &mut sheet.cash,
        ProfileField::Assets => &mut sheet.assets,
        ProfileField::Backstory => &mut sheet.backstory,
        ProfileField::Notes => &mut sheet.notes,
    }
}

pub fn memos(sheet: &CthulhuSheet, list: MemoList) -> &[MemoEntry] {
    match list {
        MemoList::Scenarios => &sheet.scenarios,
        MemoList::MythosBooks => &sheet.mythos_books,
        MemoList::Spells => &sheet.spells,
        MemoList::Artifacts => &sheet.artifacts,
        MemoList::EncounteredEntities => &sheet.encountered_entities,
    }
}

fn memos_mut(sheet: &mut CthulhuSheet, list: MemoList) -> &mut Vec<MemoEntry> {
    match list {
        MemoList::Scenarios => &mut sheet.scenarios,
        MemoList::MythosBooks => &mut sheet.mythos_books,
        MemoList::Spells => &mut sheet.spells,
        MemoList::Artifacts => &mut sheet.artifacts,
        MemoList::EncounteredEntities => &mut sheet.encountered_entities,
    }
}

pub fn skills(sheet: &CthulhuSheet, list: SkillList) -> &[CthulhuSkill] {
    match list {
        SkillList::Skills => &sheet.skills,
        SkillList::CombatSkills => &sheet.combat_skills,
        SkillList::CustomSkills => &sheet.custom_skills,
    }
}

/// Job/interest points used against their limits, shown live in the form.
pub fn points(sheet: &CthulhuSheet) -> SkillPointSummary {
    skill_point_summary(sheet)
}

/// Skills shown on the detail page: every changed skill, plus all custom skills.
pub fn visible_skills(sheet: &CthulhuSheet, edition: Edition) -> Vec<&CthulhuSkill> {
    sheet
        .skills
        .iter()
        .chain(sheet.combat_skills.iter())
        .filter(|s| s.is_changed(edition, &sheet.attributes))
        .chain(sheet.custom_skills.iter())
        .collect()
}

/// Specialty choices for 7th edition 近接戦闘 and 射撃 rows.
pub fn specialty_options(skill: &CthulhuSkill, edition: Edition) -> Option<&'static [BaseOption]> {
    if edition != Edition::Seventh || skill.is_custom {
        return None;
    }
    match skill.name.as_str() {
        "近接戦闘" => Some(MELEE_OPTIONS_7E),
        "射撃" => Some(RANGED_OPTIONS_7E),
        _ => None,
    }
}

/// The skill with a specialty picked from its options; the base follows the choice.
pub fn choose_specialty(skill: &CthulhuSkill, edition: Edition, value: &str) -> CthulhuSkill {
    let mut next = skill.clone();
    let option = specialty_options(skill, edition)
        .and_then(|options| options.iter().find(|o| o.value == value));
    if let Some(option) = option {
        next.specialty = Some(option.value.to_string());
        next.base_value = option.base_value;
    }
    next
}
