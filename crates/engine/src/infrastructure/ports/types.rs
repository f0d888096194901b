//! Query and result types used by repository ports.

use sheetkeeper_domain::{Character, GameSystem, Tags};
use sheetkeeper_shared::CharacterSort;

/// Filters, order and page of a character listing. Always scoped to one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterFilter {
    /// Case-insensitive name substring.
    pub name_contains: Option<String>,
    /// Every tag must be present.
    pub tags: Tags,
    pub system: Option<GameSystem>,
    pub sort: CharacterSort,
    /// 1-based.
    pub page: u32,
    pub limit: u32,
}

impl CharacterFilter {
    pub fn offset(&self) -> u32 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

impl Default for CharacterFilter {
    fn default() -> Self {
        Self {
            name_contains: None,
            tags: Tags::default(),
            system: None,
            sort: CharacterSort::default(),
            page: sheetkeeper_shared::DEFAULT_PAGE,
            limit: sheetkeeper_shared::DEFAULT_LIMIT,
        }
    }
}

/// One page of characters plus the total across all pages.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterPage {
    pub items: Vec<Character>,
    pub total: u64,
}
