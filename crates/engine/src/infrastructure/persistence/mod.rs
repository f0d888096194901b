//! SQLite persistence.
//!
//! Tables are created on connect. Tags and sheet data are JSON text; timestamps are
//! RFC 3339 with fixed microsecond precision so text ordering matches time ordering.

mod audit_repository;
mod character_repository;

pub use audit_repository::SqliteAuditLogRepo;
pub use character_repository::SqliteCharacterRepo;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

/// Opens (creating if missing) the database at `db_path` and ensures the schema.
pub async fn connect(db_path: &str) -> Result<SqlitePool, RepoError> {
    let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS characters (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            system TEXT NOT NULL,
            name TEXT NOT NULL,
            profile_image_url TEXT,
            tags TEXT NOT NULL DEFAULT '[]',
            is_public INTEGER NOT NULL DEFAULT 0,
            share_token TEXT UNIQUE,
            sheet_data TEXT NOT NULL DEFAULT '{}',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .map_err(|e| RepoError::database("create_characters", e))?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_characters_user ON characters (user_id)")
        .execute(&pool)
        .await
        .map_err(|e| RepoError::database("create_characters", e))?;

    // No foreign key: entries outlive the characters they describe.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS audit_logs (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL,
            character_id TEXT NOT NULL,
            action TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(&pool)
    .await
    .map_err(|e| RepoError::database("create_audit_logs", e))?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_audit_logs_character ON audit_logs (character_id)",
    )
    .execute(&pool)
    .await
    .map_err(|e| RepoError::database("create_audit_logs", e))?;

    Ok(pool)
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(value)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::corrupt(format!("bad timestamp '{value}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[tokio::test]
    async fn connect_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sheets.db");
        let path = path.to_string_lossy().to_string();

        connect(&path).await.expect("first connect");
        connect(&path).await.expect("second connect");
    }

    #[test]
    fn timestamps_sort_as_text() {
        let early = Utc.timestamp_opt(1_700_000_000, 0).single().expect("time");
        let late = Utc.timestamp_opt(1_700_000_000, 500_000).single().expect("time");
        assert!(format_timestamp(early) < format_timestamp(late));
        assert_eq!(parse_timestamp(&format_timestamp(late)).expect("parse"), late);
    }
}
