//! Sword World 2.5 adventurer sheets.

mod data;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

pub use data::{
    births_for_race, classes_in, initial_roll_formulas, race, race_modifiers, AbilityModifiers,
    ClassCategory, ClassInfo, Race, BIRTHS, CLASSES, RACES,
};

/// Starting experience when none is recorded.
pub const DEFAULT_INITIAL_EXPERIENCE: i32 = 3000;

/// 技 体 心
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Abilities {
    #[serde(rename = "技")]
    pub gi: i32,
    #[serde(rename = "体")]
    pub tai: i32,
    #[serde(rename = "心")]
    pub shin: i32,
}

/// Per-attribute numbers for the six base attributes (initials, growth).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseAttributeValues {
    #[serde(rename = "器用度")]
    pub dexterity: i32,
    #[serde(rename = "敏捷度")]
    pub agility: i32,
    #[serde(rename = "筋力")]
    pub strength: i32,
    #[serde(rename = "生命力")]
    pub vitality: i32,
    #[serde(rename = "知力")]
    pub intelligence: i32,
    #[serde(rename = "精神力")]
    pub spirit: i32,
}

impl BaseAttributeValues {
    pub const KEYS: [&'static str; 6] = ["器用度", "敏捷度", "筋力", "生命力", "知力", "精神力"];

    pub fn from_array(values: [i32; 6]) -> Self {
        let [dexterity, agility, strength, vitality, intelligence, spirit] = values;
        Self {
            dexterity,
            agility,
            strength,
            vitality,
            intelligence,
            spirit,
        }
    }

    pub fn to_array(self) -> [i32; 6] {
        [
            self.dexterity,
            self.agility,
            self.strength,
            self.vitality,
            self.intelligence,
            self.spirit,
        ]
    }

    pub fn get(&self, key: &str) -> Option<i32> {
        Self::KEYS
            .iter()
            .position(|k| *k == key)
            .map(|i| self.to_array()[i])
    }

    pub fn set(&mut self, key: &str, value: i32) {
        if let Some(i) = Self::KEYS.iter().position(|k| *k == key) {
            let mut values = self.to_array();
            values[i] = value;
            *self = Self::from_array(values);
        }
    }

    fn from_json(obj: Option<&Map<String, Value>>) -> Self {
        let mut out = Self::default();
        if let Some(obj) = obj {
            for key in Self::KEYS {
                out.set(key, lenient::int_or(obj, key, 0));
            }
        }
        out
    }
}

/// Computed attributes: the six base attributes plus HP, MP and resistances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Attributes {
    #[serde(flatten)]
    pub base: BaseAttributeValues,
    #[serde(rename = "HP")]
    pub hp: i32,
    #[serde(rename = "MP")]
    pub mp: i32,
    #[serde(rename = "生命抵抗力")]
    pub vitality_resistance: i32,
    #[serde(rename = "精神抵抗力")]
    pub mental_resistance: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Class {
    pub name: String,
    pub level: i32,
}

/// 戦闘特技
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Skill {
    pub name: String,
    pub effect: String,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Magic {
    pub name: String,
    pub system: String,
    pub cost: i32,
    pub effect: String,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Weapon {
    pub name: String,
    pub hit: i32,
    pub damage: String,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Armor {
    pub name: String,
    pub defense: i32,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sw25Accessory {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i32>,
    pub effect: String,
    pub reference_page: String,
    pub memo: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Item {
    pub name: String,
    pub quantity: i32,
    pub memo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sw25Language {
    pub name: String,
    pub speak: bool,
    pub read: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sw25Sheet {
    pub player_name: String,
    pub character_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub gender: String,
    pub abilities: Sw25Abilities,
    pub attributes: Sw25Attributes,
    pub attribute_initials: BaseAttributeValues,
    pub attribute_growth: BaseAttributeValues,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth: Option<String>,
    pub classes: Vec<Sw25Class>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adventurer_level: Option<i32>,
    pub initial_experience_points: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gained_experience_points: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_points: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub honor_points: Option<i32>,
    pub skills: Vec<Sw25Skill>,
    pub magics: Vec<Sw25Magic>,
    pub weapons: Vec<Sw25Weapon>,
    pub armors: Vec<Sw25Armor>,
    pub accessories: Vec<Sw25Accessory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<i32>,
    pub items: Vec<Sw25Item>,
    pub languages: Vec<Sw25Language>,
    pub background: String,
    pub memo: String,
}

/// Base attributes: paired ability + race modifier + initial + growth.
///
/// 器用度/敏捷度 pair with 技, 筋力/生命力 with 体, 知力/精神力 with 心.
pub fn compute_attributes(
    abilities: &Sw25Abilities,
    race_name: Option<&str>,
    initials: &BaseAttributeValues,
    growth: &BaseAttributeValues,
) -> Sw25Attributes {
    let m = race_name.map(race_modifiers).unwrap_or_default();
    let gi = abilities.gi.saturating_add(m.gi);
    let tai = abilities.tai.saturating_add(m.tai);
    let shin = abilities.shin.saturating_add(m.shin);
    let paired = [gi, gi, tai, tai, shin, shin];

    let init = initials.to_array();
    let grow = growth.to_array();
    let base = BaseAttributeValues::from_array(std::array::from_fn(|i| {
        paired[i].saturating_add(init[i]).saturating_add(grow[i])
    }));

    Sw25Attributes {
        base,
        hp: base.vitality,
        mp: base.spirit,
        vitality_resistance: base.vitality,
        mental_resistance: base.spirit,
    }
}

/// Adventurer level is the sum of class levels.
pub fn adventurer_level(classes: &[Sw25Class]) -> i32 {
    classes
        .iter()
        .fold(0i32, |total, c| total.saturating_add(c.level))
}

impl Sw25Sheet {
    pub fn empty() -> Self {
        Self::normalize(&Value::Object(Map::new()))
    }

    /// Fills defaults and recomputes attributes and adventurer level.
    pub fn normalize(data: &Value) -> Self {
        let root = lenient::root(data);
        let empty = Map::new();
        let abilities_obj = lenient::object(&root, "abilities").unwrap_or(&empty);
        let abilities = Sw25Abilities {
            gi: lenient::int_or(abilities_obj, "技", 0),
            tai: lenient::int_or(abilities_obj, "体", 0),
            shin: lenient::int_or(abilities_obj, "心", 0),
        };

        let mut sheet = Self {
            player_name: lenient::text(&root, "playerName"),
            character_name: lenient::text(&root, "characterName"),
            age: lenient::opt_int(&root, "age"),
            gender: lenient::text(&root, "gender"),
            abilities,
            attributes: Sw25Attributes::default(),
            attribute_initials: BaseAttributeValues::from_json(lenient::object(
                &root,
                "attributeInitials",
            )),
            attribute_growth: BaseAttributeValues::from_json(lenient::object(
                &root,
                "attributeGrowth",
            )),
            race: lenient::opt_text(&root, "race"),
            birth: lenient::opt_text(&root, "birth"),
            classes: lenient::objects(&root, "classes")
                .map(|c| Sw25Class {
                    name: lenient::text(c, "name"),
                    level: lenient::int_or(c, "level", 0),
                })
                .collect(),
            adventurer_level: lenient::opt_int(&root, "adventurerLevel"),
            initial_experience_points: lenient::int_or(
                &root,
                "initialExperiencePoints",
                DEFAULT_INITIAL_EXPERIENCE,
            ),
            gained_experience_points: lenient::opt_int(&root, "gainedExperiencePoints"),
            experience_points: lenient::opt_int(&root, "experiencePoints"),
            honor_points: lenient::opt_int(&root, "honorPoints"),
            skills: lenient::objects(&root, "skills")
                .map(|s| Sw25Skill {
                    name: lenient::text(s, "name"),
                    effect: lenient::text(s, "effect"),
                    memo: lenient::text(s, "memo"),
                })
                .collect(),
            magics: lenient::objects(&root, "magics")
                .map(|m| Sw25Magic {
                    name: lenient::text(m, "name"),
                    system: lenient::text(m, "system"),
                    cost: lenient::int_or(m, "cost", 0),
                    effect: lenient::text(m, "effect"),
                    memo: lenient::text(m, "memo"),
                })
                .collect(),
            weapons: lenient::objects(&root, "weapons")
                .map(|w| Sw25Weapon {
                    name: lenient::text(w, "name"),
                    hit: lenient::int_or(w, "hit", 0),
                    damage: lenient::text(w, "damage"),
                    memo: lenient::text(w, "memo"),
                })
                .collect(),
            armors: lenient::objects(&root, "armors")
                .map(|a| Sw25Armor {
                    name: lenient::text(a, "name"),
                    defense: lenient::int_or(a, "defense", 0),
                    memo: lenient::text(a, "memo"),
                })
                .collect(),
            accessories: lenient::objects(&root, "accessories")
                .map(|a| Sw25Accessory {
                    name: lenient::text(a, "name"),
                    price: lenient::opt_int(a, "price"),
                    effect: lenient::text(a, "effect"),
                    reference_page: lenient::text(a, "referencePage"),
                    memo: lenient::text(a, "memo"),
                    slot: lenient::opt_text(a, "slot"),
                })
                .collect(),
            money: lenient::opt_int(&root, "money"),
            items: lenient::objects(&root, "items")
                .map(|i| Sw25Item {
                    name: lenient::text(i, "name"),
                    quantity: lenient::int_or(i, "quantity", 0),
                    memo: lenient::text(i, "memo"),
                })
                .collect(),
            languages: lenient::objects(&root, "languages")
                .map(|l| Sw25Language {
                    name: lenient::text(l, "name"),
                    speak: lenient::boolean(l, "speak", false),
                    read: lenient::boolean(l, "read", false),
                })
                .collect(),
            background: lenient::text(&root, "background"),
            memo: lenient::text(&root, "memo"),
        };
        sheet.recompute();
        sheet
    }

    /// Recomputes attributes, and the adventurer level once any class is taken.
    pub fn recompute(&mut self) {
        self.attributes = compute_attributes(
            &self.abilities,
            self.race.as_deref(),
            &self.attribute_initials,
            &self.attribute_growth,
        );
        if !self.classes.is_empty() {
            self.adventurer_level = Some(adventurer_level(&self.classes));
        }
    }

    /// Changes race, dropping a birth the new race cannot have.
    pub fn set_race(&mut self, race: Option<String>) {
        self.race = race.filter(|r| !r.is_empty());
        if let (Some(race), Some(birth)) = (self.race.as_deref(), self.birth.as_deref()) {
            if !births_for_race(race).contains(&birth) {
                self.birth = None;
            }
        }
        self.recompute();
    }

    /// Rolls attribute initials for the current race.
    pub fn roll_initials(&mut self, mut roll_die: impl FnMut(u16) -> u16) {
        let formulas = initial_roll_formulas(self.race.as_deref().unwrap_or_default());
        let values = formulas.map(|f| f.roll_with(&mut roll_die).total);
        self.attribute_initials = BaseAttributeValues::from_array(values);
        self.recompute();
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_sheet_defaults() {
        let sheet = Sw25Sheet::empty();
        assert_eq!(sheet.initial_experience_points, 3000);
        assert_eq!(sheet.attributes, Sw25Attributes::default());
        assert!(sheet.race.is_none());
        assert!(sheet.classes.is_empty());
        assert_eq!(sheet.adventurer_level, None);
    }

    #[test]
    fn attributes_combine_ability_race_initial_and_growth() {
        let sheet = Sw25Sheet::normalize(&json!({
            "abilities": {"技": 10, "体": 8, "心": 6},
            "race": "エルフ",
            "attributeInitials": {"器用度": 7, "敏捷度": 5, "筋力": 3, "生命力": 6, "知力": 9, "精神力": 8},
            "attributeGrowth": {"器用度": 1}
        }));
        let a = sheet.attributes;
        // エルフ: 技+1 体-1 心+1
        assert_eq!(a.base.dexterity, 11 + 7 + 1);
        assert_eq!(a.base.agility, 11 + 5);
        assert_eq!(a.base.strength, 7 + 3);
        assert_eq!(a.base.vitality, 7 + 6);
        assert_eq!(a.base.intelligence, 7 + 9);
        assert_eq!(a.base.spirit, 7 + 8);
        assert_eq!(a.hp, a.base.vitality);
        assert_eq!(a.mp, a.base.spirit);
        assert_eq!(a.vitality_resistance, a.base.vitality);
        assert_eq!(a.mental_resistance, a.base.spirit);
    }

    #[test]
    fn stored_attributes_are_recomputed() {
        let sheet = Sw25Sheet::normalize(&json!({
            "abilities": {"体": 4},
            "attributes": {"生命力": 99, "HP": 99}
        }));
        assert_eq!(sheet.attributes.base.vitality, 4);
        assert_eq!(sheet.attributes.hp, 4);
    }

    #[test]
    fn adventurer_level_sums_class_levels() {
        let sheet = Sw25Sheet::normalize(&json!({
            "classes": [{"name": "ファイター", "level": 3}, {"name": "スカウト", "level": 2}]
        }));
        assert_eq!(sheet.adventurer_level, Some(5));
    }

    #[test]
    fn set_race_clears_unavailable_birth() {
        let mut sheet = Sw25Sheet::normalize(&json!({"race": "人間", "birth": "傭兵"}));
        sheet.set_race(Some("エルフ".to_string()));
        assert_eq!(sheet.birth, None);

        let mut sheet = Sw25Sheet::normalize(&json!({"race": "人間", "birth": "神官"}));
        sheet.set_race(Some("エルフ".to_string()));
        assert_eq!(sheet.birth.as_deref(), Some("神官"));
    }

    #[test]
    fn roll_initials_uses_race_formulas() {
        let mut sheet = Sw25Sheet::normalize(&json!({"race": "ドワーフ"}));
        sheet.roll_initials(|_| 1);
        // 2d+6, 1d, 2d, 2d, 1d, 2d+6
        assert_eq!(sheet.attribute_initials.to_array(), [8, 1, 2, 2, 1, 8]);
        // ドワーフ: 体+1 心-1
        assert_eq!(sheet.attributes.base.strength, 1 + 2);
        assert_eq!(sheet.attributes.base.spirit, -1 + 8);
    }

    #[test]
    fn serialized_keys_match_stored_format() {
        let value = Sw25Sheet::empty().to_value();
        assert_eq!(value["attributes"]["器用度"], 0);
        assert_eq!(value["attributes"]["生命抵抗力"], 0);
        assert_eq!(value["abilities"]["心"], 0);
        assert_eq!(value["initialExperiencePoints"], 3000);
        assert!(value["attributeInitials"].get("精神力").is_some());
    }
}
