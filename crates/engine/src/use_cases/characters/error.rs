//! Errors shared by the character-scoped use cases.

use sheetkeeper_domain::sheets::cthulhu::SkillPointViolation;
use sheetkeeper_domain::DomainError;

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    #[error("Character not found")]
    NotFound,
    #[error("Access denied")]
    Forbidden,
    #[error("Character not found or not public")]
    SharedNotFound,
    /// Malformed request parameters (bad sort, unknown system, mismatched system...).
    #[error("{0}")]
    InvalidInput(String),
    /// Well-formed but semantically rejected input (empty name...).
    #[error("{0}")]
    Validation(String),
    #[error("技能ポイントの上限を超えています")]
    SkillPointsExceeded(Vec<SkillPointViolation>),
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn system_mismatch(
        character: impl std::fmt::Display,
        requested: impl std::fmt::Display,
    ) -> Self {
        Self::InvalidInput(format!(
            "キャラクターのシステム ({character}) とリクエストのシステム ({requested}) が一致しません"
        ))
    }
}
