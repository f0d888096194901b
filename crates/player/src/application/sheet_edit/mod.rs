//! Form state for creating and editing characters.
//!
//! Every edit is a plain value applied to the draft by a reducer, so the forms
//! stay thin and the rules can be tested without a UI.

pub mod cthulhu;
pub mod shinobigami;
pub mod sw25;

use serde_json::Value;
use sheetkeeper_domain::sheets::{
    self,
    cthulhu::{CthulhuSheet, Edition},
    generic,
    shinobigami::ShinobigamiSheet,
    sw25::Sw25Sheet,
    SheetData,
};
use sheetkeeper_domain::{CharacterName, GameSystem, Tags};
use sheetkeeper_shared::{CharacterResponse, CreateCharacterRequest, UpdateCharacterRequest};

/// Add, replace or remove one row of a list section.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOp<T> {
    Add(T),
    Update(usize, T),
    Remove(usize),
}

impl<T> RowOp<T> {
    /// Applies the operation. Out-of-range indexes are ignored.
    pub fn apply(self, rows: &mut Vec<T>) {
        match self {
            RowOp::Add(row) => rows.push(row),
            RowOp::Update(index, row) => {
                if let Some(slot) = rows.get_mut(index) {
                    *slot = row;
                }
            }
            RowOp::Remove(index) => {
                if index < rows.len() {
                    rows.remove(index);
                }
            }
        }
    }
}

/// Reads a number typed into a form field. Decimals are truncated and large values
/// clamped to the sheet number range; blank or non-numeric input is 0.
pub fn parse_number(input: &str) -> i32 {
    parse_optional_number(input).unwrap_or(0)
}

/// Reads an optional number; blank or non-numeric input clears the value.
pub fn parse_optional_number(input: &str) -> Option<i32> {
    sheets::lenient::parse_int(input)
}

/// Name, tags and image shared by every system.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BasicInfo {
    pub name: String,
    pub tags: Tags,
    pub profile_image_url: String,
}

impl BasicInfo {
    pub fn from_character(character: &CharacterResponse) -> Self {
        Self {
            name: character.name.clone(),
            tags: Tags::new(&character.tags),
            profile_image_url: character.profile_image_url.clone().unwrap_or_default(),
        }
    }

    /// Adds the typed tag; returns false when it was blank or a repeat.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        self.tags.push(tag)
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.remove(tag)
    }

    /// Checks the name the same way the Engine does.
    pub fn validate(&self) -> Result<CharacterName, String> {
        CharacterName::new(self.name.as_str()).map_err(|e| match e {
            sheetkeeper_domain::DomainError::Validation(message) => message,
            other => other.to_string(),
        })
    }

    fn image_url(&self) -> Option<String> {
        let url = self.profile_image_url.trim();
        (!url.is_empty()).then(|| url.to_string())
    }
}

/// The sheet being edited, in the shape its form works with.
#[derive(Debug, Clone, PartialEq)]
pub enum SheetDraft {
    Cthulhu {
        edition: Edition,
        sheet: Box<CthulhuSheet>,
    },
    Shinobigami(ShinobigamiSheet),
    Sw25(Box<Sw25Sheet>),
    /// JSON text edited directly; parsed on save.
    Generic { text: String },
}

impl SheetDraft {
    /// A new sheet. Cthulhu sheets start with the edition's default skill lists.
    pub fn for_create(system: GameSystem) -> Self {
        match system.cthulhu_edition() {
            Some(edition) => SheetDraft::Cthulhu {
                edition,
                sheet: Box::new(CthulhuSheet::with_default_skills(edition)),
            },
            None => Self::from_stored(system, &sheets::template(system)),
        }
    }

    /// Loads stored sheet data, normalizing it first.
    pub fn from_stored(system: GameSystem, data: &Value) -> Self {
        match sheets::normalize(system, data) {
            SheetData::Cthulhu { edition, sheet } => SheetDraft::Cthulhu { edition, sheet },
            SheetData::Shinobigami(sheet) => SheetDraft::Shinobigami(sheet),
            SheetData::Sw25(sheet) => SheetDraft::Sw25(sheet),
            SheetData::Generic(value) => SheetDraft::Generic {
                text: generic::sheet_text(&value),
            },
        }
    }

    /// Stored form of the draft. Fails only for malformed generic JSON.
    pub fn to_value(&self) -> Result<Value, String> {
        match self {
            SheetDraft::Cthulhu { sheet, .. } => Ok(sheet.to_value()),
            SheetDraft::Shinobigami(sheet) => Ok(sheet.to_value()),
            SheetDraft::Sw25(sheet) => Ok(sheet.to_value()),
            SheetDraft::Generic { text } => generic::parse_sheet_text(text),
        }
    }
}

pub fn create_request(
    system: GameSystem,
    info: &BasicInfo,
    sheet: &SheetDraft,
) -> Result<CreateCharacterRequest, String> {
    let name = info.validate()?;
    Ok(CreateCharacterRequest {
        system,
        name: name.as_str().to_string(),
        tags: info.tags.as_slice().to_vec(),
        profile_image_url: info.image_url(),
        sheet_data: Some(sheet.to_value()?),
    })
}

/// Full update from the edit form. An empty image field clears the image.
pub fn update_request(info: &BasicInfo, sheet: &SheetDraft) -> Result<UpdateCharacterRequest, String> {
    let name = info.validate()?;
    Ok(UpdateCharacterRequest {
        name: Some(name.as_str().to_string()),
        tags: Some(info.tags.as_slice().to_vec()),
        profile_image_url: Some(info.profile_image_url.trim().to_string()),
        sheet_data: Some(sheet.to_value()?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn row_ops() {
        let mut rows = vec![1, 2, 3];
        RowOp::Add(4).apply(&mut rows);
        RowOp::Update(0, 10).apply(&mut rows);
        RowOp::Remove(1).apply(&mut rows);
        RowOp::Update(9, 0).apply(&mut rows);
        RowOp::Remove(9).apply(&mut rows);
        assert_eq!(rows, vec![10, 3, 4]);
    }

    #[test]
    fn number_inputs() {
        assert_eq!(parse_number(" 12 "), 12);
        assert_eq!(parse_number(""), 0);
        assert_eq!(parse_number("abc"), 0);
        assert_eq!(parse_number("12.5"), 12);
        assert_eq!(parse_number("99999999999"), sheets::lenient::MAX_SHEET_NUMBER);
        assert_eq!(parse_number("-99999999999"), -sheets::lenient::MAX_SHEET_NUMBER);
        assert_eq!(parse_optional_number(""), None);
        assert_eq!(parse_optional_number("30"), Some(30));
        assert_eq!(parse_optional_number("1e3"), Some(1000));
    }

    #[test]
    fn name_is_required() {
        let info = BasicInfo {
            name: "   ".to_string(),
            ..BasicInfo::default()
        };
        let draft = SheetDraft::for_create(GameSystem::Shinobigami);
        assert_eq!(
            create_request(GameSystem::Shinobigami, &info, &draft),
            Err("名前は必須です".to_string())
        );
    }

    #[test]
    fn create_request_trims_and_drops_empty_image() {
        let mut info = BasicInfo {
            name: " 探索者 ".to_string(),
            profile_image_url: "  ".to_string(),
            ..BasicInfo::default()
        };
        assert!(info.add_tag("新規"));
        assert!(!info.add_tag("新規"));
        assert!(!info.add_tag(" "));

        let draft = SheetDraft::for_create(GameSystem::Cthulhu6);
        let request = create_request(GameSystem::Cthulhu6, &info, &draft).expect("request");
        assert_eq!(request.name, "探索者");
        assert_eq!(request.tags, vec!["新規".to_string()]);
        assert_eq!(request.profile_image_url, None);
        let data = request.sheet_data.expect("sheet data");
        assert!(!data["skills"].as_array().expect("skills").is_empty());
    }

    #[test]
    fn update_request_clears_image_with_empty_string() {
        let info = BasicInfo {
            name: "x".to_string(),
            ..BasicInfo::default()
        };
        let draft = SheetDraft::from_stored(GameSystem::Sw25, &json!({}));
        let request = update_request(&info, &draft).expect("request");
        assert_eq!(request.profile_image_url.as_deref(), Some(""));
        assert_eq!(request.tags, Some(Vec::new()));
    }

    #[test]
    fn generic_drafts_round_through_text() {
        let draft = SheetDraft::from_stored(GameSystem::Satasupe, &json!({"犯罪": 3}));
        match &draft {
            SheetDraft::Generic { text } => assert!(text.contains("犯罪")),
            other => panic!("unexpected draft: {other:?}"),
        }
        assert_eq!(draft.to_value(), Ok(json!({"犯罪": 3})));

        let broken = SheetDraft::Generic {
            text: "{".to_string(),
        };
        let err = broken.to_value().expect_err("malformed");
        assert!(err.starts_with("JSONの形式が正しくありません"));
    }

    #[test]
    fn stored_cthulhu_data_is_normalized() {
        let draft = SheetDraft::from_stored(
            GameSystem::Cthulhu7,
            &json!({"attributes": {"CON": 50, "SIZ": 60}}),
        );
        match draft {
            SheetDraft::Cthulhu { edition, sheet } => {
                assert_eq!(edition, Edition::Seventh);
                assert_eq!(sheet.derived.hp_max, 11);
            }
            other => panic!("unexpected draft: {other:?}"),
        }
    }
}
