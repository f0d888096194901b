//! Call of Cthulhu investigator sheets (6th and 7th edition).
//!
//! JSON keys match the stored sheet format exactly (`STR`, `SAN_current`, `baseValue`, ...).

mod derived;
mod generate;
mod skills;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

pub use derived::{compute_derived, damage_bonus_6e, damage_bonus_and_build_7e, movement_rate};
pub use generate::roll_attributes;
pub use skills::{
    combat_skills, default_skills, effective_base_value, skill_point_summary,
    validate_skill_points, BaseOption, SkillPointSummary, SkillPointViolation, MELEE_OPTIONS_7E,
    RANGED_OPTIONS_7E,
};

/// Rules edition of a Cthulhu sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edition {
    Sixth,
    Seventh,
}

impl Edition {
    pub fn label(&self) -> &'static str {
        match self {
            Edition::Sixth => "第6版",
            Edition::Seventh => "第7版",
        }
    }
}

/// The eight core characteristics, plus luck in 7th edition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CthulhuAttributes {
    #[serde(rename = "STR")]
    pub str: i32,
    #[serde(rename = "CON")]
    pub con: i32,
    #[serde(rename = "POW")]
    pub pow: i32,
    #[serde(rename = "DEX")]
    pub dex: i32,
    #[serde(rename = "APP")]
    pub app: i32,
    #[serde(rename = "INT")]
    pub int: i32,
    #[serde(rename = "EDU")]
    pub edu: i32,
    #[serde(rename = "SIZ")]
    pub siz: i32,
    #[serde(rename = "LUK", default, skip_serializing_if = "Option::is_none")]
    pub luk: Option<i32>,
}

/// Keys of the attribute grid, in display order. `LUK` is not part of the grid.
pub const ATTRIBUTE_KEYS: [&str; 8] = ["STR", "CON", "POW", "DEX", "APP", "SIZ", "INT", "EDU"];

impl CthulhuAttributes {
    pub fn get(&self, key: &str) -> Option<i32> {
        match key {
            "STR" => Some(self.str),
            "CON" => Some(self.con),
            "POW" => Some(self.pow),
            "DEX" => Some(self.dex),
            "APP" => Some(self.app),
            "INT" => Some(self.int),
            "EDU" => Some(self.edu),
            "SIZ" => Some(self.siz),
            "LUK" => self.luk,
            _ => None,
        }
    }

    /// Sets a characteristic by key, clamping to `0..=MAX_SHEET_NUMBER`. Unknown keys
    /// are ignored.
    pub fn set(&mut self, key: &str, value: i32) {
        let value = value.clamp(0, lenient::MAX_SHEET_NUMBER);
        match key {
            "STR" => self.str = value,
            "CON" => self.con = value,
            "POW" => self.pow = value,
            "DEX" => self.dex = value,
            "APP" => self.app = value,
            "INT" => self.int = value,
            "EDU" => self.edu = value,
            "SIZ" => self.siz = value,
            "LUK" => self.luk = Some(value),
            _ => {}
        }
    }

    fn from_json(obj: Option<&Map<String, Value>>, edition: Edition) -> Self {
        let empty = Map::new();
        let obj = obj.unwrap_or(&empty);
        let read = |key: &str| lenient::int_or(obj, key, 0).clamp(0, lenient::MAX_SHEET_NUMBER);
        Self {
            str: read("STR"),
            con: read("CON"),
            pow: read("POW"),
            dex: read("DEX"),
            app: read("APP"),
            int: read("INT"),
            edu: read("EDU"),
            siz: read("SIZ"),
            luk: match edition {
                Edition::Sixth => None,
                Edition::Seventh => Some(read("LUK")),
            },
        }
    }

    /// Copy with every characteristic inside `0..=MAX_SHEET_NUMBER`.
    pub fn clamped(&self) -> Self {
        let clamp = |v: i32| v.clamp(0, lenient::MAX_SHEET_NUMBER);
        Self {
            str: clamp(self.str),
            con: clamp(self.con),
            pow: clamp(self.pow),
            dex: clamp(self.dex),
            app: clamp(self.app),
            int: clamp(self.int),
            edu: clamp(self.edu),
            siz: clamp(self.siz),
            luk: self.luk.map(clamp),
        }
    }
}

/// Derived values. Pools have a current and a max; the rest are recomputed on every load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CthulhuDerived {
    #[serde(rename = "SAN_current")]
    pub san_current: i32,
    #[serde(rename = "SAN_max")]
    pub san_max: i32,
    #[serde(rename = "HP_current")]
    pub hp_current: i32,
    #[serde(rename = "HP_max")]
    pub hp_max: i32,
    #[serde(rename = "MP_current")]
    pub mp_current: i32,
    #[serde(rename = "MP_max")]
    pub mp_max: i32,
    #[serde(rename = "IDEA", default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<i32>,
    #[serde(rename = "KNOW", default, skip_serializing_if = "Option::is_none")]
    pub know: Option<i32>,
    #[serde(rename = "LUCK", default, skip_serializing_if = "Option::is_none")]
    pub luck: Option<i32>,
    #[serde(rename = "DB", default, skip_serializing_if = "Option::is_none")]
    pub db: Option<String>,
    #[serde(rename = "BUILD", default, skip_serializing_if = "Option::is_none")]
    pub build: Option<i32>,
    #[serde(rename = "MOV", default, skip_serializing_if = "Option::is_none")]
    pub mov: Option<i32>,
}

impl CthulhuDerived {
    /// Keeps the current pools of `previous`, leaving every max value as computed.
    pub fn with_current_pools_of(mut self, previous: &CthulhuDerived) -> Self {
        self.san_current = previous.san_current;
        self.hp_current = previous.hp_current;
        self.mp_current = previous.mp_current;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CthulhuSkill {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    pub base_value: i32,
    pub job_points: i32,
    pub interest_points: i32,
    pub growth: i32,
    pub other: i32,
    pub total: i32,
    pub is_custom: bool,
}

impl CthulhuSkill {
    pub fn new(name: impl Into<String>, base_value: i32) -> Self {
        Self {
            name: name.into(),
            base_value,
            total: base_value,
            ..Self::default()
        }
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>) -> Self {
        self.specialty = Some(specialty.into());
        self
    }

    pub fn custom(name: impl Into<String>) -> Self {
        Self {
            is_custom: true,
            ..Self::new(name, 0)
        }
    }

    /// Name with the specialty in parentheses, e.g. `科学(数学)`.
    pub fn display_name(&self) -> String {
        match self.specialty.as_deref() {
            Some(s) if !s.is_empty() => format!("{}({})", self.name, s),
            _ => self.name.clone(),
        }
    }

    /// Recomputes `total` from its parts using the effective base value.
    pub fn recompute_total(&mut self, edition: Edition, attributes: &CthulhuAttributes) {
        self.total = effective_base_value(self, edition, attributes)
            .saturating_add(self.job_points)
            .saturating_add(self.interest_points)
            .saturating_add(self.growth)
            .saturating_add(self.other);
    }

    /// True when points were spent on the skill, i.e. the total differs from its base.
    pub fn is_changed(&self, edition: Edition, attributes: &CthulhuAttributes) -> bool {
        self.total != effective_base_value(self, edition, attributes)
    }

    fn from_json(obj: &Map<String, Value>, custom: bool) -> Self {
        // Older sheets stored a single `value` instead of the breakdown.
        let base_value = lenient::opt_int(obj, "baseValue")
            .or_else(|| lenient::opt_int(obj, "value"))
            .unwrap_or(0);
        Self {
            name: lenient::text(obj, "name"),
            specialty: lenient::opt_text(obj, "specialty"),
            base_value,
            job_points: lenient::opt_int(obj, "jobPoints")
                .or_else(|| lenient::opt_int(obj, "job_points"))
                .unwrap_or(0),
            interest_points: lenient::opt_int(obj, "interestPoints")
                .or_else(|| lenient::opt_int(obj, "interest_points"))
                .unwrap_or(0),
            growth: lenient::int_or(obj, "growth", 0),
            other: lenient::int_or(obj, "other", 0),
            total: 0,
            is_custom: custom || lenient::boolean(obj, "isCustom", false),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CthulhuWeapon {
    pub name: String,
    pub value: String,
    pub damage: String,
    pub range: String,
    pub attacks: String,
    pub ammo: i32,
    pub malfunction: i32,
    /// Only shown for 6th edition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<String>,
}

impl CthulhuWeapon {
    fn from_json(obj: &Map<String, Value>) -> Self {
        Self {
            name: lenient::text(obj, "name"),
            value: lenient::text(obj, "value"),
            damage: lenient::text(obj, "damage"),
            range: lenient::text(obj, "range"),
            attacks: lenient::text(obj, "attacks"),
            ammo: lenient::int_or(obj, "ammo", 0),
            malfunction: lenient::int_or(obj, "malfunction", 0),
            durability: lenient::opt_text(obj, "durability"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CthulhuItem {
    pub name: String,
    pub quantity: i32,
    pub detail: String,
}

impl Default for CthulhuItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            detail: String::new(),
        }
    }
}

/// A `{name, memo}` row: scenarios, mythos books, spells, artifacts, entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoEntry {
    pub name: String,
    pub memo: String,
}

impl MemoEntry {
    fn from_json(obj: &Map<String, Value>) -> Self {
        Self {
            name: lenient::text(obj, "name"),
            memo: lenient::text(obj, "memo"),
        }
    }
}

/// A fully populated Cthulhu sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CthulhuSheet {
    pub player_name: String,
    pub occupation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i32>,
    pub gender: String,
    pub birthplace: String,
    pub school_degree: String,
    pub attributes: CthulhuAttributes,
    pub derived: CthulhuDerived,
    pub skills: Vec<CthulhuSkill>,
    pub combat_skills: Vec<CthulhuSkill>,
    pub custom_skills: Vec<CthulhuSkill>,
    pub weapons: Vec<CthulhuWeapon>,
    pub items: Vec<CthulhuItem>,
    pub cash: String,
    pub assets: String,
    pub backstory: String,
    pub notes: String,
    pub scenarios: Vec<MemoEntry>,
    pub mythos_books: Vec<MemoEntry>,
    pub spells: Vec<MemoEntry>,
    pub artifacts: Vec<MemoEntry>,
    pub encountered_entities: Vec<MemoEntry>,
}

impl CthulhuSheet {
    /// An empty sheet with zero attributes and no skills.
    pub fn empty(edition: Edition) -> Self {
        Self::normalize(edition, &Value::Object(Map::new()))
    }

    /// A new sheet for the create form: empty, with the edition's default skill lists.
    pub fn with_default_skills(edition: Edition) -> Self {
        let mut sheet = Self::empty(edition);
        sheet.skills = default_skills(edition);
        sheet.combat_skills = combat_skills(edition);
        sheet.recompute_skill_totals(edition);
        sheet
    }

    /// Builds a complete sheet from loosely typed stored JSON.
    ///
    /// Missing fields get defaults and every derived value is recomputed from the
    /// attributes. Only the current SAN/HP/MP pools survive from the stored data, and
    /// only when present; otherwise they start at their max.
    pub fn normalize(edition: Edition, data: &Value) -> Self {
        let root = lenient::root(data);
        let attributes =
            CthulhuAttributes::from_json(lenient::object(&root, "attributes"), edition);

        let mut derived = compute_derived(edition, &attributes);
        if let Some(stored) = lenient::object(&root, "derived") {
            if let Some(v) = lenient::opt_int(stored, "SAN_current") {
                derived.san_current = v;
            }
            if let Some(v) = lenient::opt_int(stored, "HP_current") {
                derived.hp_current = v;
            }
            if let Some(v) = lenient::opt_int(stored, "MP_current") {
                derived.mp_current = v;
            }
        }

        let skills_of = |key: &str, custom: bool| -> Vec<CthulhuSkill> {
            lenient::objects(&root, key)
                .map(|obj| CthulhuSkill::from_json(obj, custom))
                .collect()
        };
        let memos_of = |key: &str| -> Vec<MemoEntry> {
            lenient::objects(&root, key).map(MemoEntry::from_json).collect()
        };

        let mut sheet = Self {
            player_name: lenient::text(&root, "playerName"),
            occupation: lenient::text(&root, "occupation"),
            age: lenient::opt_int(&root, "age"),
            gender: lenient::text(&root, "gender"),
            birthplace: lenient::text(&root, "birthplace"),
            school_degree: lenient::text(&root, "schoolDegree"),
            attributes,
            derived,
            skills: skills_of("skills", false),
            combat_skills: skills_of("combatSkills", false),
            custom_skills: skills_of("customSkills", true),
            weapons: lenient::objects(&root, "weapons")
                .map(CthulhuWeapon::from_json)
                .collect(),
            items: lenient::objects(&root, "items")
                .map(|obj| CthulhuItem {
                    name: lenient::text(obj, "name"),
                    quantity: lenient::int_or(obj, "quantity", 1),
                    detail: lenient::text(obj, "detail"),
                })
                .collect(),
            cash: lenient::text(&root, "cash"),
            assets: lenient::text(&root, "assets"),
            backstory: lenient::text(&root, "backstory"),
            notes: lenient::text(&root, "notes"),
            scenarios: memos_of("scenarios"),
            mythos_books: memos_of("mythosBooks"),
            spells: memos_of("spells"),
            artifacts: memos_of("artifacts"),
            encountered_entities: memos_of("encounteredEntities"),
        };
        sheet.recompute_skill_totals(edition);
        sheet
    }

    /// Replaces one attribute, recomputing derived values and keeping current pools.
    pub fn update_attribute(&mut self, edition: Edition, key: &str, value: i32) {
        self.attributes.set(key, value);
        self.derived =
            compute_derived(edition, &self.attributes).with_current_pools_of(&self.derived);
        self.recompute_skill_totals(edition);
    }

    /// Replaces all attributes (auto-roll), recomputing derived values and keeping
    /// current pools.
    pub fn replace_attributes(&mut self, edition: Edition, attributes: CthulhuAttributes) {
        self.attributes = attributes;
        self.derived =
            compute_derived(edition, &self.attributes).with_current_pools_of(&self.derived);
        self.recompute_skill_totals(edition);
    }

    pub fn recompute_skill_totals(&mut self, edition: Edition) {
        let attributes = self.attributes;
        for skill in self
            .skills
            .iter_mut()
            .chain(self.combat_skills.iter_mut())
            .chain(self.custom_skills.iter_mut())
        {
            skill.recompute_total(edition, &attributes);
        }
    }

    /// Every skill list in display order: skills, combat skills, then custom skills.
    pub fn all_skills(&self) -> impl Iterator<Item = &CthulhuSkill> {
        self.skills
            .iter()
            .chain(self.combat_skills.iter())
            .chain(self.custom_skills.iter())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
