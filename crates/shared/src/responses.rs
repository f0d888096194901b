//! Response bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sheetkeeper_domain::export::CocofoliaClipboard;
use sheetkeeper_domain::sheets::cthulhu::{CthulhuAttributes, CthulhuDerived};
use sheetkeeper_domain::GameSystem;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterResponse {
    pub id: Uuid,
    pub user_id: String,
    pub system: GameSystem,
    pub name: String,
    pub tags: Vec<String>,
    pub profile_image_url: Option<String>,
    pub sheet_data: serde_json::Value,
    pub is_public: bool,
    pub share_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterListResponse {
    pub items: Vec<CharacterResponse>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

impl CharacterListResponse {
    /// Number of pages needed for `total` items; at least 1.
    pub fn page_count(&self) -> u32 {
        let limit = u64::from(self.limit.max(1));
        (self.total.div_ceil(limit)).max(1) as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishResponse {
    pub is_public: bool,
    pub share_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoRollResponse {
    pub attributes: CthulhuAttributes,
    pub derived: CthulhuDerived,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRollResponse {
    pub rolls: Vec<i32>,
    pub total: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUploadUrlResponse {
    pub upload_url: String,
    pub public_url: String,
    pub expires_at: DateTime<Utc>,
}

/// Options the export was produced with, echoed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaExportMeta {
    pub system: GameSystem,
    pub skill_scope: String,
    pub dice: String,
    pub include_icon: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaExportResponse {
    pub clipboard: CocofoliaClipboard,
    /// `clipboard` as compact JSON, ready to paste.
    #[serde(rename = "clipboardText")]
    pub clipboard_text: String,
    pub meta: CocofoliaExportMeta,
}
