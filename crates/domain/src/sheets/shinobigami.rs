//! Shinobigami ninja sheets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;
use crate::error::DomainError;

/// Most skills a character may take from the skill table.
pub const MAX_SKILLS: usize = 6;

/// Six skill domains, in skill-table column order.
pub const DOMAINS: [&str; 6] = ["器術", "体術", "忍術", "謀術", "戦術", "妖術"];

/// Domain used when a school is unknown.
pub const DEFAULT_DOMAIN: &str = "体術";

/// A school and the rules it brings with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct School {
    pub name: &'static str,
    pub domain: &'static str,
    /// 流儀
    pub creed: &'static str,
    /// 仇敵
    pub nemesis: &'static str,
}

pub const SCHOOLS: [School; 6] = [
    School {
        name: "斜歯忍軍",
        domain: "器術",
        creed: "他の流派の「奥義の内容」を集める",
        nemesis: "鞍馬神流",
    },
    School {
        name: "鞍馬神流",
        domain: "体術",
        creed: "シノビガミの復活を阻止する",
        nemesis: "隠忍の血統",
    },
    School {
        name: "ハグレモノ",
        domain: "忍術",
        creed: "誰にも縛られず、自分の意志で戦った",
        nemesis: "斜歯忍軍",
    },
    School {
        name: "比良坂機関",
        domain: "謀術",
        creed: "日本の国益を守る",
        nemesis: "私立御斎学園",
    },
    School {
        name: "私立御斎学園",
        domain: "戦術",
        creed: "誰かの秘密を探す",
        nemesis: "ハグレモノ",
    },
    School {
        name: "隠忍の血統",
        domain: "妖術",
        creed: "シノビガミ復活に関する情報を入手する",
        nemesis: "比良坂機関",
    },
];

/// Skill table rows 2..=12, one name per domain in [`DOMAINS`] order.
const SKILL_TABLE: [[&str; 6]; 11] = [
    ["絡繰術", "騎乗術", "生存術", "医術", "兵糧術", "異形化"],
    ["火術", "砲術", "潜伏術", "毒術", "鳥獣術", "召喚術"],
    ["水術", "手裏剣術", "遁走術", "罠術", "野戦術", "死霊術"],
    ["針術", "手練", "盗聴術", "調査術", "地の利", "結界術"],
    ["仕込み", "身体操術", "腹話術", "詐術", "意気", "封術"],
    ["衣装術", "歩法", "隠形術", "対人術", "用兵術", "言霊術"],
    ["縄術", "走法", "変装術", "遊芸", "記憶術", "幻術"],
    ["登術", "飛術", "香術", "九ノ一の術", "見敵術", "瞳術"],
    ["拷問術", "骨法術", "分身の術", "傀儡の術", "暗号術", "千里眼の術"],
    ["壊器術", "刀術", "隠蔽術", "流言の術", "伝達術", "憑依術"],
    ["掘削術", "怪力", "第六感", "経済力", "人脈", "呪術"],
];

pub const SKILL_TABLE_ROWS: std::ops::RangeInclusive<u8> = 2..=12;

pub const RANKS: [&str; 8] = ["草", "下忍", "下忍頭", "中忍", "中忍頭", "上忍", "上忍頭", "頭領"];

pub fn school(name: &str) -> Option<&'static School> {
    SCHOOLS.iter().find(|s| s.name == name)
}

/// Skill domain of a school; unknown schools fall back to 体術.
pub fn domain_for_school(name: &str) -> &'static str {
    school(name).map_or(DEFAULT_DOMAIN, |s| s.domain)
}

/// 流儀 of a school, empty for unknown schools.
pub fn creed_for_school(name: &str) -> &'static str {
    school(name).map_or("", |s| s.creed)
}

/// 仇敵 of a school, empty for unknown schools.
pub fn nemesis_of(name: &str) -> &'static str {
    school(name).map_or("", |s| s.nemesis)
}

/// Skill name at a table cell.
pub fn skill_at(row: u8, domain: &str) -> Option<&'static str> {
    if !SKILL_TABLE_ROWS.contains(&row) {
        return None;
    }
    let column = DOMAINS.iter().position(|d| *d == domain)?;
    Some(SKILL_TABLE[(row - 2) as usize][column])
}

/// Domain of a skill name, if it is in the table.
pub fn domain_of_skill(name: &str) -> Option<&'static str> {
    SKILL_TABLE
        .iter()
        .find_map(|row| row.iter().position(|s| *s == name))
        .map(|column| DOMAINS[column])
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShinobigamiAttributes {
    #[serde(rename = "体術")]
    pub taijutsu: i32,
    #[serde(rename = "忍術")]
    pub ninjutsu: i32,
    #[serde(rename = "謀術")]
    pub boujutsu: i32,
    #[serde(rename = "戦術")]
    pub senjutsu: i32,
    #[serde(rename = "器術")]
    pub kijutsu: i32,
    #[serde(rename = "心術")]
    pub shinjutsu: i32,
}

impl ShinobigamiAttributes {
    pub const KEYS: [&'static str; 6] = ["体術", "忍術", "謀術", "戦術", "器術", "心術"];

    pub fn get(&self, key: &str) -> Option<i32> {
        match key {
            "体術" => Some(self.taijutsu),
            "忍術" => Some(self.ninjutsu),
            "謀術" => Some(self.boujutsu),
            "戦術" => Some(self.senjutsu),
            "器術" => Some(self.kijutsu),
            "心術" => Some(self.shinjutsu),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: i32) {
        match key {
            "体術" => self.taijutsu = value,
            "忍術" => self.ninjutsu = value,
            "謀術" => self.boujutsu = value,
            "戦術" => self.senjutsu = value,
            "器術" => self.kijutsu = value,
            "心術" => self.shinjutsu = value,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShinobigamiSkill {
    pub name: String,
    pub value: i32,
    pub domain: String,
}

/// 忍法
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ninpo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub skill: String,
    pub range: String,
    pub cost: String,
    pub page: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShinobigamiSheet {
    pub attributes: ShinobigamiAttributes,
    pub skills: Vec<ShinobigamiSkill>,
    pub school: String,
    pub ninpo: Vec<Ninpo>,
    pub secret_flag: bool,
    pub background: String,
}

impl ShinobigamiSheet {
    pub fn normalize(data: &Value) -> Self {
        let root = lenient::root(data);
        let empty = Map::new();
        let attrs = lenient::object(&root, "attributes").unwrap_or(&empty);

        let mut attributes = ShinobigamiAttributes::default();
        for key in ShinobigamiAttributes::KEYS {
            attributes.set(key, lenient::int_or(attrs, key, 0));
        }

        Self {
            attributes,
            skills: lenient::objects(&root, "skills")
                .map(|s| ShinobigamiSkill {
                    name: lenient::text(s, "name"),
                    value: lenient::int_or(s, "value", 0),
                    domain: lenient::text(s, "domain"),
                })
                .collect(),
            school: lenient::text(&root, "school"),
            ninpo: lenient::objects(&root, "ninpo")
                .map(|n| Ninpo {
                    name: lenient::text(n, "name"),
                    kind: lenient::text(n, "type"),
                    skill: lenient::text(n, "skill"),
                    range: lenient::text(n, "range"),
                    cost: lenient::text(n, "cost"),
                    page: lenient::text(n, "page"),
                })
                .collect(),
            secret_flag: lenient::boolean(&root, "secret_flag", false),
            background: lenient::text(&root, "background"),
        }
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    /// Takes or drops a skill from the table.
    ///
    /// Dropping is always allowed. Taking fails once [`MAX_SKILLS`] are held.
    pub fn toggle_skill(&mut self, name: &str, domain: &str) -> Result<(), DomainError> {
        if let Some(index) = self.skills.iter().position(|s| s.name == name) {
            self.skills.remove(index);
            return Ok(());
        }
        if self.skills.len() >= MAX_SKILLS {
            return Err(DomainError::constraint(format!(
                "特技は最大{}個までです",
                MAX_SKILLS
            )));
        }
        self.skills.push(ShinobigamiSkill {
            name: name.to_string(),
            value: 0,
            domain: domain.to_string(),
        });
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
