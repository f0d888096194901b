//! Cocofolia clipboard export.
//!
//! Cocofolia imports a character pasted as `{"kind":"character","data":{...}}`. Each
//! system that supports the export registers a [`CocofoliaExporter`] in the
//! [`ExporterRegistry`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::game_system::GameSystem;
use crate::sheets::cthulhu::{CthulhuSheet, Edition, ATTRIBUTE_KEYS};

/// Which skills become chat-palette commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillScope {
    /// Only skills with points spent on them.
    #[default]
    Changed,
    All,
}

impl SkillScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillScope::Changed => "changed",
            SkillScope::All => "all",
        }
    }
}

impl FromStr for SkillScope {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "changed" => Ok(SkillScope::Changed),
            "all" => Ok(SkillScope::All),
            other => Err(DomainError::parse(format!("unknown skill scope: {other}"))),
        }
    }
}

/// Dice command prefix used in the chat palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiceStyle {
    /// `CCB`: 6th edition style with fixed critical/fumble ranges.
    #[default]
    #[serde(rename = "CCB")]
    Ccb,
    /// `CC`: 7th edition style.
    #[serde(rename = "CC")]
    Cc,
}

impl DiceStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiceStyle::Ccb => "CCB",
            DiceStyle::Cc => "CC",
        }
    }
}

impl fmt::Display for DiceStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiceStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CCB" => Ok(DiceStyle::Ccb),
            "CC" => Ok(DiceStyle::Cc),
            other => Err(DomainError::parse(format!("unknown dice style: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    pub system: GameSystem,
    pub skill_scope: SkillScope,
    pub dice: DiceStyle,
    pub include_icon: bool,
}

/// What an exporter reads from a character.
#[derive(Debug, Clone, Copy)]
pub struct ExportInput<'a> {
    pub name: &'a str,
    pub sheet_data: &'a Value,
    /// Public share page, when the character is published.
    pub share_url: Option<&'a str>,
    /// Character image, when icons are requested and one is set.
    pub icon_url: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaStatus {
    pub label: String,
    pub value: i32,
    pub max: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaParam {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CocofoliaCharacter {
    pub name: String,
    pub memo: String,
    pub initiative: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    pub status: Vec<CocofoliaStatus>,
    pub params: Vec<CocofoliaParam>,
    /// Chat palette, one command per line.
    pub commands: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaClipboard {
    /// Always `"character"`.
    pub kind: String,
    pub data: CocofoliaCharacter,
}

impl CocofoliaClipboard {
    pub fn character(data: CocofoliaCharacter) -> Self {
        Self {
            kind: "character".to_string(),
            data,
        }
    }

    /// Compact JSON, ready to paste into Cocofolia.
    pub fn to_clipboard_text(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Builds Cocofolia clipboard data for one game system.
pub trait CocofoliaExporter: Send + Sync {
    fn clipboard(
        &self,
        input: &ExportInput<'_>,
        options: &ExportOptions,
    ) -> Result<CocofoliaClipboard, DomainError>;
}

/// Exporter for both Cthulhu editions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CthulhuExporter;

impl CthulhuExporter {
    fn memo(sheet: &CthulhuSheet) -> String {
        let mut lines = Vec::new();
        if !sheet.occupation.is_empty() {
            lines.push(format!("職業: {}", sheet.occupation));
        }
        if let Some(age) = sheet.age {
            lines.push(format!("年齢: {age}"));
        }
        if !sheet.notes.is_empty() {
            lines.push(sheet.notes.clone());
        }
        lines.join("\n")
    }

    fn commands(sheet: &CthulhuSheet, edition: Edition, options: &ExportOptions) -> String {
        let dice = options.dice.as_str();
        let mut lines: Vec<String> = sheet
            .all_skills()
            .filter(|s| !s.name.trim().is_empty())
            .filter(|s| match options.skill_scope {
                SkillScope::All => true,
                SkillScope::Changed => s.is_changed(edition, &sheet.attributes),
            })
            .map(|s| format!("{dice}<={} 【{}】", s.total, s.display_name()))
            .collect();

        lines.push(format!("{dice}<={{SAN}} 【SANチェック】"));

        if edition == Edition::Sixth {
            for key in ATTRIBUTE_KEYS {
                lines.push(format!("{dice}<={{{key}}}*5 【{key} × 5】"));
            }
        }
        lines.join("\n")
    }
}

impl CocofoliaExporter for CthulhuExporter {
    fn clipboard(
        &self,
        input: &ExportInput<'_>,
        options: &ExportOptions,
    ) -> Result<CocofoliaClipboard, DomainError> {
        let edition = options
            .system
            .cthulhu_edition()
            .ok_or_else(|| DomainError::unsupported_system(options.system, "cocofolia export"))?;
        let sheet = CthulhuSheet::normalize(edition, input.sheet_data);
        let derived = &sheet.derived;

        let status = vec![
            CocofoliaStatus {
                label: "HP".to_string(),
                value: derived.hp_current,
                max: derived.hp_max,
            },
            CocofoliaStatus {
                label: "MP".to_string(),
                value: derived.mp_current,
                max: derived.mp_max,
            },
            CocofoliaStatus {
                label: "SAN".to_string(),
                value: derived.san_current,
                max: derived.san_max,
            },
        ];

        let mut params: Vec<CocofoliaParam> = ATTRIBUTE_KEYS
            .iter()
            .filter_map(|key| {
                sheet.attributes.get(key).map(|value| CocofoliaParam {
                    label: key.to_string(),
                    value: value.to_string(),
                })
            })
            .collect();
        if let Some(luk) = sheet.attributes.luk {
            params.push(CocofoliaParam {
                label: "LUK".to_string(),
                value: luk.to_string(),
            });
        }

        Ok(CocofoliaClipboard::character(CocofoliaCharacter {
            name: input.name.to_string(),
            memo: Self::memo(&sheet),
            initiative: sheet.attributes.dex,
            external_url: input.share_url.map(str::to_string),
            icon_url: input
                .icon_url
                .filter(|_| options.include_icon)
                .map(str::to_string),
            status,
            params,
            commands: Self::commands(&sheet, edition, options),
        }))
    }
}

/// Exporters keyed by game system.
#[derive(Clone, Default)]
pub struct ExporterRegistry {
    exporters: HashMap<GameSystem, Arc<dyn CocofoliaExporter>>,
}

impl ExporterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in exporter.
    pub fn with_builtin() -> Self {
        let cthulhu: Arc<dyn CocofoliaExporter> = Arc::new(CthulhuExporter);
        let mut registry = Self::new();
        registry.register(GameSystem::Cthulhu6, cthulhu.clone());
        registry.register(GameSystem::Cthulhu7, cthulhu);
        registry
    }

    pub fn register(&mut self, system: GameSystem, exporter: Arc<dyn CocofoliaExporter>) {
        self.exporters.insert(system, exporter);
    }

    pub fn get(&self, system: GameSystem) -> Option<Arc<dyn CocofoliaExporter>> {
        self.exporters.get(&system).cloned()
    }

    pub fn supports(&self, system: GameSystem) -> bool {
        self.exporters.contains_key(&system)
    }
}

impl fmt::Debug for ExporterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut systems: Vec<_> = self.exporters.keys().collect();
        systems.sort();
        f.debug_struct("ExporterRegistry")
            .field("systems", &systems)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn options(system: GameSystem, skill_scope: SkillScope) -> ExportOptions {
        ExportOptions {
            system,
            skill_scope,
            dice: DiceStyle::Ccb,
            include_icon: true,
        }
    }

    fn sample_sheet() -> Value {
        json!({
            "occupation": "探偵",
            "age": 28,
            "notes": "よく眠る",
            "attributes": {"STR": 10, "CON": 12, "POW": 14, "DEX": 13, "APP": 9, "INT": 15, "EDU": 16, "SIZ": 11},
            "derived": {"SAN_current": 60, "HP_current": 9},
            "skills": [
                {"name": "目星", "baseValue": 25, "jobPoints": 50},
                {"name": "図書館", "baseValue": 25},
                {"name": "回避", "baseValue": 0}
            ],
            "customSkills": [{"name": "料理", "baseValue": 5, "interestPoints": 20}]
        })
    }

    fn export(system: GameSystem, scope: SkillScope, data: &Value) -> CocofoliaCharacter {
        let input = ExportInput {
            name: "探索者",
            sheet_data: data,
            share_url: Some("https://example.test/share/abc"),
            icon_url: Some("https://example.test/icon.png"),
        };
        CthulhuExporter
            .clipboard(&input, &options(system, scope))
            .expect("cthulhu export")
            .data
    }

    #[test]
    fn status_params_and_initiative() {
        let data = export(GameSystem::Cthulhu6, SkillScope::Changed, &sample_sheet());
        assert_eq!(data.name, "探索者");
        assert_eq!(data.initiative, 13);
        assert_eq!(
            data.status,
            vec![
                CocofoliaStatus { label: "HP".into(), value: 9, max: 3 },
                CocofoliaStatus { label: "MP".into(), value: 3, max: 3 },
                CocofoliaStatus { label: "SAN".into(), value: 60, max: 70 },
            ]
        );
        assert_eq!(data.params.len(), 8);
        assert_eq!(data.params[0], CocofoliaParam { label: "STR".into(), value: "10".into() });
        assert_eq!(data.memo, "職業: 探偵\n年齢: 28\nよく眠る");
        assert_eq!(data.external_url.as_deref(), Some("https://example.test/share/abc"));
        assert_eq!(data.icon_url.as_deref(), Some("https://example.test/icon.png"));
    }

    #[test]
    fn changed_scope_keeps_only_spent_skills() {
        let data = export(GameSystem::Cthulhu6, SkillScope::Changed, &sample_sheet());
        let lines: Vec<&str> = data.commands.lines().collect();
        assert_eq!(lines[0], "CCB<=75 【目星】");
        assert_eq!(lines[1], "CCB<=25 【料理】");
        assert_eq!(lines[2], "CCB<={SAN} 【SANチェック】");
        assert_eq!(lines[3], "CCB<={STR}*5 【STR × 5】");
        assert_eq!(lines.len(), 3 + 8);
    }

    #[test]
    fn all_scope_includes_untouched_skills_with_dynamic_base() {
        let data = export(GameSystem::Cthulhu6, SkillScope::All, &sample_sheet());
        assert!(data.commands.contains("CCB<=25 【図書館】"));
        // 回避 = DEX × 2 in 6th edition
        assert!(data.commands.contains("CCB<=26 【回避】"));
    }

    #[test]
    fn seventh_edition_has_no_attribute_checks_and_exports_luck() {
        let sheet = json!({"attributes": {"DEX": 60, "POW": 50, "LUK": 45}});
        let input = ExportInput {
            name: "x",
            sheet_data: &sheet,
            share_url: None,
            icon_url: None,
        };
        let mut opts = options(GameSystem::Cthulhu7, SkillScope::Changed);
        opts.dice = DiceStyle::Cc;
        let data = CthulhuExporter
            .clipboard(&input, &opts)
            .expect("cthulhu export")
            .data;
        assert_eq!(data.commands, "CC<={SAN} 【SANチェック】");
        assert_eq!(data.params.last().map(|p| p.label.as_str()), Some("LUK"));
        assert_eq!(data.external_url, None);
    }

    #[test]
    fn icon_is_dropped_when_not_requested() {
        let sheet = sample_sheet();
        let input = ExportInput {
            name: "x",
            sheet_data: &sheet,
            share_url: None,
            icon_url: Some("https://example.test/icon.png"),
        };
        let mut opts = options(GameSystem::Cthulhu6, SkillScope::Changed);
        opts.include_icon = false;
        let data = CthulhuExporter
            .clipboard(&input, &opts)
            .expect("cthulhu export")
            .data;
        assert_eq!(data.icon_url, None);
    }

    #[test]
    fn non_cthulhu_system_is_rejected() {
        let sheet = json!({});
        let input = ExportInput {
            name: "x",
            sheet_data: &sheet,
            share_url: None,
            icon_url: None,
        };
        let result = CthulhuExporter.clipboard(&input, &options(GameSystem::Sw25, SkillScope::All));
        assert!(matches!(result, Err(DomainError::UnsupportedSystem { .. })));
    }

    #[test]
    fn clipboard_text_is_compact_json() {
        let clipboard = CocofoliaClipboard::character(export(
            GameSystem::Cthulhu6,
            SkillScope::Changed,
            &sample_sheet(),
        ));
        let text = clipboard.to_clipboard_text();
        assert!(text.starts_with("{\"kind\":\"character\",\"data\":{"));
        assert!(text.contains("\"externalUrl\""));
        assert!(text.contains("探索者"));
    }

    #[test]
    fn registry_covers_cthulhu_only() {
        let registry = ExporterRegistry::with_builtin();
        assert!(registry.supports(GameSystem::Cthulhu6));
        assert!(registry.supports(GameSystem::Cthulhu7));
        assert!(!registry.supports(GameSystem::Shinobigami));
        assert!(registry.get(GameSystem::Satasupe).is_none());
    }

    #[test]
    fn option_parsing() {
        assert_eq!("all".parse::<SkillScope>().ok(), Some(SkillScope::All));
        assert_eq!("CC".parse::<DiceStyle>().ok(), Some(DiceStyle::Cc));
        assert!("cc".parse::<DiceStyle>().is_err());
    }
}
