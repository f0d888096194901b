//! Repository port traits for database access.

use async_trait::async_trait;
use sheetkeeper_domain::{AuditLogEntry, Character, CharacterId, UserId};

use super::error::RepoError;
use super::types::{CharacterFilter, CharacterPage};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
    /// Inserts or replaces the whole record.
    async fn save(&self, character: &Character) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &CharacterFilter,
    ) -> Result<CharacterPage, RepoError>;
    /// A public character by its share token.
    async fn get_public_by_token(&self, token: &str) -> Result<Option<Character>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditLogRepo: Send + Sync {
    async fn record(&self, entry: &AuditLogEntry) -> Result<(), RepoError>;
    /// Entries for a character, oldest first.
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AuditLogEntry>, RepoError>;
}
