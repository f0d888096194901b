//! Validated name newtypes
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits (counted in characters, not bytes)
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for a character name, in characters
pub const MAX_NAME_LENGTH: usize = 200;

/// A validated character name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CharacterName(String);

impl CharacterName {
    /// Create a new validated character name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if:
    /// - The name is empty after trimming
    /// - The name exceeds 200 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("名前は必須です"));
        }
        if trimmed.chars().count() > MAX_NAME_LENGTH {
            return Err(DomainError::validation(format!(
                "名前は{}文字以内で入力してください",
                MAX_NAME_LENGTH
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CharacterName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CharacterName> for String {
    fn from(name: CharacterName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = CharacterName::new("  探索者  ").expect("valid");
        assert_eq!(name.as_str(), "探索者");
    }

    #[test]
    fn rejects_blank() {
        let err = CharacterName::new("   ").expect_err("blank name");
        assert_eq!(err, DomainError::validation("名前は必須です"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let at_limit = "あ".repeat(MAX_NAME_LENGTH);
        assert!(CharacterName::new(at_limit).is_ok());

        let over = "あ".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            CharacterName::new(over),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn deserialization_validates() {
        let ok: Result<CharacterName, _> = serde_json::from_str("\"Alice\"");
        assert!(ok.is_ok());
        let bad: Result<CharacterName, _> = serde_json::from_str("\"\"");
        assert!(bad.is_err());
    }
}
