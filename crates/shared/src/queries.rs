//! Query-string parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("Invalid sort option: {0}")]
    InvalidSort(String),
    #[error("page must be 1 or greater")]
    InvalidPage,
    #[error("limit must be between 1 and {MAX_LIMIT}")]
    InvalidLimit,
}

/// Sort order of the character list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterSort {
    NameAsc,
    NameDesc,
    CreatedAsc,
    CreatedDesc,
    UpdatedAsc,
    #[default]
    UpdatedDesc,
    SystemAsc,
}

impl CharacterSort {
    pub const ALL: [CharacterSort; 7] = [
        CharacterSort::NameAsc,
        CharacterSort::NameDesc,
        CharacterSort::CreatedAsc,
        CharacterSort::CreatedDesc,
        CharacterSort::UpdatedAsc,
        CharacterSort::UpdatedDesc,
        CharacterSort::SystemAsc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CharacterSort::NameAsc => "name_asc",
            CharacterSort::NameDesc => "name_desc",
            CharacterSort::CreatedAsc => "created_asc",
            CharacterSort::CreatedDesc => "created_desc",
            CharacterSort::UpdatedAsc => "updated_asc",
            CharacterSort::UpdatedDesc => "updated_desc",
            CharacterSort::SystemAsc => "system_asc",
        }
    }

    /// Label for the dashboard sort selector.
    pub fn label(&self) -> &'static str {
        match self {
            CharacterSort::NameAsc => "名前（昇順）",
            CharacterSort::NameDesc => "名前（降順）",
            CharacterSort::CreatedAsc => "作成日（古い順）",
            CharacterSort::CreatedDesc => "作成日（新しい順）",
            CharacterSort::UpdatedAsc => "更新日（古い順）",
            CharacterSort::UpdatedDesc => "更新日（新しい順）",
            CharacterSort::SystemAsc => "システム",
        }
    }
}

impl fmt::Display for CharacterSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterSort {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == s)
            .ok_or_else(|| QueryError::InvalidSort(s.to_string()))
    }
}

/// `GET /api/characters` parameters as they appear on the wire.
///
/// Fields stay loosely typed so the Engine can reject bad values with its own messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterListQuery {
    /// Case-insensitive name substring.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Comma separated; every tag must be present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl CharacterListQuery {
    pub fn sort(&self) -> Result<CharacterSort, QueryError> {
        match self.sort.as_deref() {
            None | Some("") => Ok(CharacterSort::default()),
            Some(s) => s.parse(),
        }
    }

    pub fn page(&self) -> Result<u32, QueryError> {
        match self.page {
            None => Ok(DEFAULT_PAGE),
            Some(p) if p >= 1 => u32::try_from(p).map_err(|_| QueryError::InvalidPage),
            Some(_) => Err(QueryError::InvalidPage),
        }
    }

    pub fn limit(&self) -> Result<u32, QueryError> {
        match self.limit {
            None => Ok(DEFAULT_LIMIT),
            Some(l) if (1..=MAX_LIMIT as i64).contains(&l) => Ok(l as u32),
            Some(_) => Err(QueryError::InvalidLimit),
        }
    }

    /// Key/value pairs for building a URL query string.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let text = [
            ("query", &self.query),
            ("tags", &self.tags),
            ("system", &self.system),
            ("sort", &self.sort),
        ];
        for (key, value) in text {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, v.to_string()));
            }
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

/// `GET /api/characters/{id}/export/cocofolia` parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CocofoliaExportQuery {
    pub system: String,
    #[serde(default = "default_skill_scope")]
    pub skill_scope: String,
    #[serde(default = "default_dice")]
    pub dice: String,
    #[serde(default = "default_include_icon")]
    pub include_icon: bool,
}

fn default_skill_scope() -> String {
    "changed".to_string()
}

fn default_dice() -> String {
    "CCB".to_string()
}

fn default_include_icon() -> bool {
    true
}

impl CocofoliaExportQuery {
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            skill_scope: default_skill_scope(),
            dice: default_dice(),
            include_icon: default_include_icon(),
        }
    }

    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("system", self.system.clone()),
            ("skill_scope", self.skill_scope.clone()),
            ("dice", self.dice.clone()),
            ("include_icon", self.include_icon.to_string()),
        ]
    }
}
