//! Sword World 2.5 sheet edits.

use sheetkeeper_domain::sheets::sw25::{
    BaseAttributeValues, Sw25Accessory, Sw25Armor, Sw25Class, Sw25Item, Sw25Language, Sw25Magic, Sw25Sheet, Sw25Skill,
    Sw25Weapon,
};

use super::RowOp;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ability {
    Gi,
    Tai,
    Shin,
}

impl Ability {
    pub const ALL: [Ability; 3] = [Ability::Gi, Ability::Tai, Ability::Shin];

    pub fn label(&self) -> &'static str {
        match self {
            Ability::Gi => "技",
            Ability::Tai => "体",
            Ability::Shin => "心",
        }
    }

    pub fn get(&self, sheet: &Sw25Sheet) -> i32 {
        match self {
            Ability::Gi => sheet.abilities.gi,
            Ability::Tai => sheet.abilities.tai,
            Ability::Shin => sheet.abilities.shin,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    PlayerName,
    CharacterName,
    Gender,
    Background,
    Memo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    Age,
    InitialExperience,
    GainedExperience,
    Experience,
    Honor,
    Money,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sw25Edit {
    Ability(Ability, i32),
    Initial { key: String, value: i32 },
    /// All six initials at once, from a roll.
    Initials(BaseAttributeValues),
    Growth { key: String, value: i32 },
    Race(Option<String>),
    Birth(Option<String>),
    Class(RowOp<Sw25Class>),
    Text(TextField, String),
    Number(NumberField, Option<i32>),
    Skill(RowOp<Sw25Skill>),
    Magic(RowOp<Sw25Magic>),
    Weapon(RowOp<Sw25Weapon>),
    Armor(RowOp<Sw25Armor>),
    Accessory(RowOp<Sw25Accessory>),
    Item(RowOp<Sw25Item>),
    Language(RowOp<Sw25Language>),
}

pub fn apply(sheet: &mut Sw25Sheet, edit: Sw25Edit) {
    match edit {
        Sw25Edit::Ability(ability, value) => {
            match ability {
                Ability::Gi => sheet.abilities.gi = value,
                Ability::Tai => sheet.abilities.tai = value,
                Ability::Shin => sheet.abilities.shin = value,
            }
            sheet.recompute();
        }
        Sw25Edit::Initial { key, value } => {
            sheet.attribute_initials.set(&key, value);
            sheet.recompute();
        }
        Sw25Edit::Initials(values) => {
            sheet.attribute_initials = values;
            sheet.recompute();
        }
        Sw25Edit::Growth { key, value } => {
            sheet.attribute_growth.set(&key, value);
            sheet.recompute();
        }
        Sw25Edit::Race(race) => sheet.set_race(race),
        Sw25Edit::Birth(birth) => sheet.birth = birth.filter(|b| !b.is_empty()),
        Sw25Edit::Class(op) => {
            op.apply(&mut sheet.classes);
            sheet.recompute();
        }
        Sw25Edit::Text(field, value) => {
            let slot = match field {
                TextField::PlayerName => &mut sheet.player_name,
                TextField::CharacterName => &mut sheet.character_name,
                TextField::Gender => &mut sheet.gender,
                TextField::Background => &mut sheet.background,
                TextField::Memo => &mut sheet.memo,
            };
            *slot = value;
        }
        Sw25Edit::Number(field, value) => match field {
            NumberField::Age => sheet.age = value,
            NumberField::InitialExperience => sheet.initial_experience_points = value.unwrap_or(0),
            NumberField::GainedExperience => sheet.gained_experience_points = value,
            NumberField::Experience => sheet.experience_points = value,
            NumberField::Honor => sheet.honor_points = value,
            NumberField::Money => sheet.money = value,
        },
        Sw25Edit::Skill(op) => op.apply(&mut sheet.skills),
        Sw25Edit::Magic(op) => op.apply(&mut sheet.magics),
        Sw25Edit::Weapon(op) => op.apply(&mut sheet.weapons),
        Sw25Edit::Armor(op) => op.apply(&mut sheet.armors),
        Sw25Edit::Accessory(op) => op.apply(&mut sheet.accessories),
        Sw25Edit::Item(op) => op.apply(&mut sheet.items),
        Sw25Edit::Language(op) => op.apply(&mut sheet.languages),
    }
}

/// Rolls the attribute initials for the sheet's race.
pub fn roll_initials(sheet: &Sw25Sheet, roll_die: impl FnMut(u16) -> u16) -> Sw25Edit {
    let mut rolled = sheet.clone();
    rolled.roll_initials(roll_die);
    Sw25Edit::Initials(rolled.attribute_initials)
}

pub fn number(sheet: &Sw25Sheet, field: NumberField) -> Option<i32> {
    match field {
        NumberField::Age => sheet.age,
        NumberField::InitialExperience => Some(sheet.initial_experience_points),
        NumberField::GainedExperience => sheet.gained_experience_points,
        NumberField::Experience => sheet.experience_points,
        NumberField::Honor => sheet.honor_points,
        NumberField::Money => sheet.money,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abilities_and_race_feed_attributes() {
        let mut sheet = Sw25Sheet::empty();
        apply(&mut sheet, Sw25Edit::Ability(Ability::Gi, 10));
        apply(
            &mut sheet,
            Sw25Edit::Initial {
                key: "器用度".to_string(),
                value: 7,
            },
        );
        assert_eq!(sheet.attributes.base.dexterity, 17);

        apply(&mut sheet, Sw25Edit::Race(Some("エルフ".to_string())));
        assert_eq!(sheet.attributes.base.dexterity, 18);
        assert_eq!(sheet.attributes.base.agility, 11);
    }

    #[test]
    fn race_change_drops_unavailable_birth() {
        let mut sheet = Sw25Sheet::empty();
        apply(&mut sheet, Sw25Edit::Birth(Some("傭兵".to_string())));
        apply(&mut sheet, Sw25Edit::Race(Some("エルフ".to_string())));
        assert_eq!(sheet.birth, None);
    }

    #[test]
    fn classes_set_adventurer_level() {
        let mut sheet = Sw25Sheet::empty();
        apply(
            &mut sheet,
            Sw25Edit::Class(RowOp::Add(Sw25Class {
                name: "ファイター".to_string(),
                level: 2,
            })),
        );
        apply(
            &mut sheet,
            Sw25Edit::Class(RowOp::Add(Sw25Class {
                name: "スカウト".to_string(),
                level: 1,
            })),
        );
        assert_eq!(sheet.adventurer_level, Some(3));
    }

    #[test]
    fn rolled_initials_use_the_race_formulas() {
        let mut sheet = Sw25Sheet::empty();
        apply(&mut sheet, Sw25Edit::Race(Some("人間".to_string())));
        let edit = roll_initials(&sheet, |_| 3);
        assert_eq!(sheet.attribute_initials.to_array(), [0; 6]);
        apply(&mut sheet, edit);
        assert_eq!(sheet.attribute_initials.to_array(), [6; 6]);
        assert_eq!(sheet.attributes.hp, 6);
    }

    #[test]
    fn number_fields() {
        let mut sheet = Sw25Sheet::empty();
        apply(&mut sheet, Sw25Edit::Number(NumberField::Money, Some(1200)));
        apply(&mut sheet, Sw25Edit::Number(NumberField::InitialExperience, None));
        assert_eq!(number(&sheet, NumberField::Money), Some(1200));
        assert_eq!(number(&sheet, NumberField::InitialExperience), Some(0));
    }
}
