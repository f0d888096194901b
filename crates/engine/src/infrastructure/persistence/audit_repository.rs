//! SQLite-backed audit log.

use async_trait::async_trait;
use sheetkeeper_domain::{AuditLogEntry, AuditLogId, CharacterId, UserId};
use sqlx::{Row, SqlitePool};

use super::{format_timestamp, parse_timestamp};
use crate::infrastructure::ports::{AuditLogRepo, RepoError};

pub struct SqliteAuditLogRepo {
    pool: SqlitePool,
}

impl SqliteAuditLogRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepo for SqliteAuditLogRepo {
    async fn record(&self, entry: &AuditLogEntry) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO audit_logs (id, user_id, character_id, action, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(entry.id.to_string())
        .bind(entry.user_id.as_str())
        .bind(entry.character_id.to_string())
        .bind(entry.action.as_str())
        .bind(format_timestamp(entry.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("record_audit", e))?;

        Ok(())
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<AuditLogEntry>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, user_id, character_id, action, created_at FROM audit_logs \
             WHERE character_id = ? ORDER BY created_at ASC, rowid ASC",
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_audit", e))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let user_id: String = row.get("user_id");
                let character_id: String = row.get("character_id");
                let action: String = row.get("action");
                let created_at: String = row.get("created_at");

                Ok(AuditLogEntry {
                    id: AuditLogId::parse(&id).map_err(RepoError::corrupt)?,
                    user_id: UserId::new(user_id).map_err(RepoError::corrupt)?,
                    character_id: CharacterId::parse(&character_id)
                        .map_err(RepoError::corrupt)?,
                    action: action.parse().map_err(RepoError::corrupt)?,
                    created_at: parse_timestamp(&created_at)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use sheetkeeper_domain::AuditAction;

    use crate::infrastructure::persistence::connect;

    #[tokio::test]
    async fn entries_come_back_oldest_first() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("audit.db");
        let repo = SqliteAuditLogRepo::new(connect(&path.to_string_lossy()).await.expect("connect"));

        let user = UserId::new("user-1").expect("user");
        let character_id = CharacterId::new();
        let t0 = Utc.timestamp_opt(1_700_000_000, 0).single().expect("time");

        for (offset, action) in [(1, AuditAction::Update), (0, AuditAction::Create)] {
            let entry = AuditLogEntry::new(
                AuditLogId::new(),
                user.clone(),
                character_id,
                action,
                t0 + Duration::seconds(offset),
            );
            repo.record(&entry).await.expect("record");
        }
        let unrelated =
            AuditLogEntry::new(AuditLogId::new(), user, CharacterId::new(), AuditAction::Delete, t0);
        repo.record(&unrelated).await.expect("record");

        let entries = repo.list_for_character(character_id).await.expect("list");
        let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, vec![AuditAction::Create, AuditAction::Update]);
    }
}
