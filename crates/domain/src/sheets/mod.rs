//! Character sheets per game system.
//!
//! Stored sheet JSON is loosely typed. [`normalize`] turns it into a fully populated
//! [`SheetData`], filling defaults and recomputing every derived value, and
//! [`SheetData::to_value`] writes it back in the stored key format.

pub mod cthulhu;
pub mod generic;
pub mod lenient;
pub mod shinobigami;
pub mod sw25;

use serde_json::{json, Value};

use crate::game_system::GameSystem;
use cthulhu::{validate_skill_points, CthulhuSheet, Edition, SkillPointViolation};
use shinobigami::ShinobigamiSheet;
use sw25::Sw25Sheet;

/// A normalized sheet of any system.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetData {
    Cthulhu {
        edition: Edition,
        sheet: Box<CthulhuSheet>,
    },
    Shinobigami(ShinobigamiSheet),
    Sw25(Box<Sw25Sheet>),
    /// Raw JSON for systems without a dedicated layout.
    Generic(Value),
}

impl SheetData {
    pub fn to_value(&self) -> Value {
        match self {
            SheetData::Cthulhu { sheet, .. } => sheet.to_value(),
            SheetData::Shinobigami(sheet) => sheet.to_value(),
            SheetData::Sw25(sheet) => sheet.to_value(),
            SheetData::Generic(value) => value.clone(),
        }
    }

    pub fn as_cthulhu(&self) -> Option<(Edition, &CthulhuSheet)> {
        match self {
            SheetData::Cthulhu { edition, sheet } => Some((*edition, sheet)),
            _ => None,
        }
    }
}

/// Normalizes stored sheet JSON for a system.
pub fn normalize(system: GameSystem, data: &Value) -> SheetData {
    match system {
        GameSystem::Cthulhu6 => SheetData::Cthulhu {
            edition: Edition::Sixth,
            sheet: Box::new(CthulhuSheet::normalize(Edition::Sixth, data)),
        },
        GameSystem::Cthulhu7 => SheetData::Cthulhu {
            edition: Edition::Seventh,
            sheet: Box::new(CthulhuSheet::normalize(Edition::Seventh, data)),
        },
        GameSystem::Shinobigami => SheetData::Shinobigami(ShinobigamiSheet::normalize(data)),
        GameSystem::Sw25 => SheetData::Sw25(Box::new(Sw25Sheet::normalize(data))),
        GameSystem::Satasupe => SheetData::Generic(data.clone()),
    }
}

/// Initial sheet data stored when a character is created without any.
pub fn template(system: GameSystem) -> Value {
    match system {
        GameSystem::Satasupe => json!({
            "attributes": {},
            "skills": [],
            "items": [],
            "background": "",
        }),
        other => normalize(other, &Value::Object(Default::default())).to_value(),
    }
}

/// True when sheet data is absent or an empty object.
pub fn is_blank(data: &Value) -> bool {
    generic::is_empty_sheet(data)
}

/// Checks skill-point limits. Only Cthulhu sheets have them.
pub fn check_skill_points(system: GameSystem, data: &Value) -> Result<(), Vec<SkillPointViolation>> {
    match system.cthulhu_edition() {
        Some(edition) => validate_skill_points(&CthulhuSheet::normalize(edition, data)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_numbers_normalize_without_overflow() {
        let max = lenient::MAX_SHEET_NUMBER;
        let sheet = normalize(
            GameSystem::Cthulhu6,
            &json!({"attributes": {"STR": 2147483647, "SIZ": 10, "POW": "1e20"}}),
        )
        .to_value();
        assert_eq!(sheet["attributes"]["STR"], max);
        assert_eq!(sheet["attributes"]["POW"], max);
        assert_eq!(sheet["derived"]["SAN_max"], max * 5);

        let data = json!({
            "attributes": {"EDU": 10},
            "skills": [
                {"name": "目星", "jobPoints": 2147483647},
                {"name": "聞き耳", "jobPoints": 2147483647}
            ]
        });
        let violations = check_skill_points(GameSystem::Cthulhu6, &data).expect_err("over limit");
        assert_eq!(
            violations,
            vec![SkillPointViolation::JobPoints { used: max * 2, limit: 200 }]
        );
    }

    #[test]
    fn oversized_sw25_numbers_normalize_without_overflow() {
        let max = lenient::MAX_SHEET_NUMBER;
        let sheet = normalize(
            GameSystem::Sw25,
            &json!({
                "abilities": {"技": 2147483647, "体": 1, "心": 1},
                "attributeInitials": {"器用度": 2147483647},
                "attributeGrowth": {"器用度": "1e20"},
                "classes": [
                    {"name": "ファイター", "level": 2147483647},
                    {"name": "スカウト", "level": 2147483647}
                ]
            }),
        );
        let SheetData::Sw25(sheet) = sheet else {
            panic!("expected a SW2.5 sheet");
        };
        assert_eq!(sheet.abilities.gi, max);
        assert_eq!(sheet.attributes.base.dexterity, max * 3);
        assert_eq!(sw25::adventurer_level(&sheet.classes), max * 2);
    }

    #[test]
    fn every_template_normalizes_to_itself() {
        for system in GameSystem::ALL {
            let template = template(system);
            assert_eq!(normalize(system, &template).to_value(), template, "{system}");
        }
    }

    #[test]
    fn cthulhu_templates_differ_by_edition() {
        let sixth = template(GameSystem::Cthulhu6);
        let seventh = template(GameSystem::Cthulhu7);
        assert!(sixth["attributes"].get("LUK").is_none());
        assert_eq!(seventh["attributes"]["LUK"], 0);
        assert_eq!(sixth["derived"]["DB"], "+0");
    }

    #[test]
    fn satasupe_is_kept_verbatim() {
        let data = json!({"attributes": {"犯罪": 3}, "extra": [1]});
        assert_eq!(normalize(GameSystem::Satasupe, &data).to_value(), data);
    }

    #[test]
    fn skill_points_are_checked_for_cthulhu_only() {
        let data = json!({
            "attributes": {"EDU": 10, "INT": 10},
            "skills": [{"name": "目星", "baseValue": 25, "jobPoints": 250}]
        });
        let violations = check_skill_points(GameSystem::Cthulhu6, &data)
            .expect_err("job points over EDU × 20");
        assert_eq!(violations.len(), 1);
        assert_eq!(
            violations[0].to_string(),
            "職業Pの上限を超えています: 250/200 (EDU × 20)"
        );
        assert!(check_skill_points(GameSystem::Sw25, &data).is_ok());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(&Value::Null));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!({"a": 1})));
    }
}
