//! SQLite-backed character storage.

use async_trait::async_trait;
use sheetkeeper_domain::{Character, CharacterId, CharacterName, GameSystem, Tags, UserId};
use sheetkeeper_shared::CharacterSort;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool};

use super::{format_timestamp, parse_timestamp};
use crate::infrastructure::ports::{CharacterFilter, CharacterPage, CharacterRepo, RepoError};

const COLUMNS: &str = "id, user_id, system, name, profile_image_url, tags, is_public, \
                       share_token, sheet_data, created_at, updated_at";

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn order_clause(sort: CharacterSort) -> &'static str {
    match sort {
        CharacterSort::NameAsc => "name ASC, updated_at DESC, id ASC",
        CharacterSort::NameDesc => "name DESC, updated_at DESC, id ASC",
        CharacterSort::CreatedAsc => "created_at ASC, id ASC",
        CharacterSort::CreatedDesc => "created_at DESC, id ASC",
        CharacterSort::UpdatedAsc => "updated_at ASC, id ASC",
        CharacterSort::UpdatedDesc => "updated_at DESC, id ASC",
        CharacterSort::SystemAsc => "system ASC, name ASC, updated_at DESC, id ASC",
    }
}

/// Appends the owner and filter conditions shared by the page and count queries.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, user_id: &UserId, filter: &CharacterFilter) {
    qb.push(" WHERE user_id = ");
    qb.push_bind(user_id.as_str().to_string());

    if let Some(name) = filter.name_contains.as_deref().filter(|n| !n.is_empty()) {
        qb.push(" AND instr(lower(name), lower(");
        qb.push_bind(name.to_string());
        qb.push(")) > 0");
    }
    for tag in filter.tags.iter() {
        qb.push(" AND EXISTS (SELECT 1 FROM json_each(characters.tags) WHERE value = ");
        qb.push_bind(tag.to_string());
        qb.push(")");
    }
    if let Some(system) = filter.system {
        qb.push(" AND system = ");
        qb.push_bind(system.as_str());
    }
}

fn row_to_character(row: &SqliteRow) -> Result<Character, RepoError> {
    let get_text = |column: &'static str| -> Result<String, RepoError> {
        row.try_get::<String, _>(column)
            .map_err(|e| RepoError::database("read_character", e))
    };

    let id = CharacterId::parse(&get_text("id")?).map_err(RepoError::corrupt)?;
    let user_id = UserId::new(get_text("user_id")?).map_err(RepoError::corrupt)?;
    let system: GameSystem = get_text("system")?
        .parse()
        .map_err(RepoError::corrupt)?;
    let name = CharacterName::new(get_text("name")?).map_err(RepoError::corrupt)?;
    let tags: Vec<String> =
        serde_json::from_str(&get_text("tags")?).map_err(RepoError::corrupt)?;
    let sheet_data =
        serde_json::from_str(&get_text("sheet_data")?).map_err(RepoError::corrupt)?;
    let profile_image_url: Option<String> = row
        .try_get("profile_image_url")
        .map_err(|e| RepoError::database("read_character", e))?;
    let share_token: Option<String> = row
        .try_get("share_token")
        .map_err(|e| RepoError::database("read_character", e))?;
    let is_public: bool = row
        .try_get("is_public")
        .map_err(|e| RepoError::database("read_character", e))?;

    Ok(Character {
        id,
        user_id,
        system,
        name,
        profile_image_url,
        tags: Tags::new(tags),
        is_public,
        share_token,
        sheet_data,
        created_at: parse_timestamp(&get_text("created_at")?)?,
        updated_at: parse_timestamp(&get_text("updated_at")?)?,
    })
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!("SELECT {COLUMNS} FROM characters WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_character", e))?;

        row.as_ref().map(row_to_character).transpose()
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        let tags = serde_json::to_string(character.tags.as_slice())
            .map_err(RepoError::corrupt)?;
        let sheet_data =
            serde_json::to_string(&character.sheet_data).map_err(RepoError::corrupt)?;

        sqlx::query(
            r#"
            INSERT INTO characters (
                id, user_id, system, name, profile_image_url, tags, is_public,
                share_token, sheet_data, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                system = excluded.system,
                name = excluded.name,
                profile_image_url = excluded.profile_image_url,
                tags = excluded.tags,
                is_public = excluded.is_public,
                share_token = excluded.share_token,
                sheet_data = excluded.sheet_data,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(character.id.to_string())
        .bind(character.user_id.as_str())
        .bind(character.system.as_str())
        .bind(character.name.as_str())
        .bind(character.profile_image_url.as_deref())
        .bind(tags)
        .bind(character.is_public)
        .bind(character.share_token.as_deref())
        .bind(sheet_data)
        .bind(format_timestamp(character.created_at))
        .bind(format_timestamp(character.updated_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::database("save_character", e))?;

        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Character", id));
        }
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
        filter: &CharacterFilter,
    ) -> Result<CharacterPage, RepoError> {
        let mut count_query = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) AS total FROM characters");
        push_filters(&mut count_query, user_id, filter);
        let total: i64 = count_query
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| RepoError::database("count_characters", e))?
            .try_get("total")
            .map_err(|e| RepoError::database("count_characters", e))?;

        let mut page_query =
            QueryBuilder::<Sqlite>::new(format!("SELECT {COLUMNS} FROM characters"));
        push_filters(&mut page_query, user_id, filter);
        page_query.push(" ORDER BY ");
        page_query.push(order_clause(filter.sort));
        page_query.push(" LIMIT ");
        page_query.push_bind(i64::from(filter.limit));
        page_query.push(" OFFSET ");
        page_query.push_bind(i64::from(filter.offset()));

        let rows = page_query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        let items = rows
            .iter()
            .map(row_to_character)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CharacterPage {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    async fn get_public_by_token(&self, token: &str) -> Result<Option<Character>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {COLUMNS} FROM characters WHERE share_token = ? AND is_public = 1"
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_shared_character", e))?;

        row.as_ref().map(row_to_character).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use serde_json::json;

    use crate::infrastructure::persistence::connect;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).single().expect("time")
    }

    fn owner() -> UserId {
        UserId::new("user-1").expect("user id")
    }

    fn character(name: &str, system: GameSystem, tags: &[&str], minutes: i64) -> Character {
        Character::new(
            CharacterId::new(),
            owner(),
            system,
            CharacterName::new(name).expect("name"),
            t0() + Duration::minutes(minutes),
        )
        .with_tags(Tags::new(tags.iter().copied()))
    }

    async fn repo() -> (tempfile::TempDir, SqliteCharacterRepo) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("characters.db");
        let pool = connect(&path.to_string_lossy()).await.expect("connect");
        (dir, SqliteCharacterRepo::new(pool))
    }

    fn names(page: &CharacterPage) -> Vec<&str> {
        page.items.iter().map(|c| c.name.as_str()).collect()
    }

    #[tokio::test]
    async fn save_then_get_round_trips_every_field() {
        let (_dir, repo) = repo().await;
        let mut stored = character("探索者", GameSystem::Cthulhu6, &["pc", "長編"], 0)
            .with_profile_image_url(Some("https://img.example/a.png".to_string()))
            .with_sheet_data(json!({"attributes": {"STR": 12}}));
        stored.publish(|| "token-1".to_string(), t0());

        repo.save(&stored).await.expect("save");
        let loaded = repo.get(stored.id).await.expect("get").expect("present");

        assert_eq!(loaded, stored);
    }

    #[tokio::test]
    async fn save_twice_updates_in_place() {
        let (_dir, repo) = repo().await;
        let mut stored = character("before", GameSystem::Shinobigami, &[], 0);
        repo.save(&stored).await.expect("save");

        stored.name = CharacterName::new("after").expect("name");
        stored.updated_at = t0() + Duration::hours(1);
        repo.save(&stored).await.expect("save again");

        let loaded = repo.get(stored.id).await.expect("get").expect("present");
        assert_eq!(loaded.name.as_str(), "after");
        assert_eq!(loaded.created_at, t0());
        let page = repo
            .list_for_user(&owner(), &CharacterFilter::default())
            .await
            .expect("list");
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let (_dir, repo) = repo().await;
        let stored = character("gone", GameSystem::Sw25, &[], 0);
        repo.save(&stored).await.expect("save");

        repo.delete(stored.id).await.expect("delete");
        assert!(repo.get(stored.id).await.expect("get").is_none());
        let err = repo.delete(stored.id).await.expect_err("second delete");
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn list_filters_by_name_tags_and_system() {
        let (_dir, repo) = repo().await;
        for c in [
            character("Alice Smith", GameSystem::Cthulhu6, &["pc", "campaign"], 0),
            character("BOB", GameSystem::Cthulhu7, &["npc"], 1),
            character("alice jr", GameSystem::Shinobigami, &["pc"], 2),
        ] {
            repo.save(&c).await.expect("save");
        }
        let other = Character::new(
            CharacterId::new(),
            UserId::new("someone-else").expect("user"),
            GameSystem::Cthulhu6,
            CharacterName::new("Alice Other").expect("name"),
            t0(),
        );
        repo.save(&other).await.expect("save other");

        let by_name = CharacterFilter {
            name_contains: Some("ALICE".to_string()),
            ..CharacterFilter::default()
        };
        let page = repo.list_for_user(&owner(), &by_name).await.expect("list");
        assert_eq!(names(&page), vec!["alice jr", "Alice Smith"]);
        assert_eq!(page.total, 2);

        let by_tags = CharacterFilter {
            tags: Tags::parse_csv("pc, campaign"),
            ..CharacterFilter::default()
        };
        let page = repo.list_for_user(&owner(), &by_tags).await.expect("list");
        assert_eq!(names(&page), vec!["Alice Smith"]);

        let by_system = CharacterFilter {
            system: Some(GameSystem::Cthulhu7),
            ..CharacterFilter::default()
        };
        let page = repo.list_for_user(&owner(), &by_system).await.expect("list");
        assert_eq!(names(&page), vec!["BOB"]);
    }

    #[tokio::test]
    async fn list_sorts_and_pages() {
        let (_dir, repo) = repo().await;
        for c in [
            character("c", GameSystem::Shinobigami, &[], 0),
            character("a", GameSystem::Cthulhu7, &[], 1),
            character("b", GameSystem::Cthulhu6, &[], 2),
        ] {
            repo.save(&c).await.expect("save");
        }

        let sorted = |sort| CharacterFilter {
            sort,
            ..CharacterFilter::default()
        };
        let list = |filter: CharacterFilter| {
            let repo = &repo;
            async move { repo.list_for_user(&owner(), &filter).await.expect("list") }
        };

        assert_eq!(names(&list(sorted(CharacterSort::UpdatedDesc)).await), vec!["b", "a", "c"]);
        assert_eq!(names(&list(sorted(CharacterSort::CreatedAsc)).await), vec!["c", "a", "b"]);
        assert_eq!(names(&list(sorted(CharacterSort::NameAsc)).await), vec!["a", "b", "c"]);
        assert_eq!(names(&list(sorted(CharacterSort::NameDesc)).await), vec!["c", "b", "a"]);
        assert_eq!(names(&list(sorted(CharacterSort::SystemAsc)).await), vec!["b", "a", "c"]);

        let second_page = CharacterFilter {
            sort: CharacterSort::NameAsc,
            page: 2,
            limit: 2,
            ..CharacterFilter::default()
        };
        let page = list(second_page).await;
        assert_eq!(names(&page), vec!["c"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn shared_lookup_requires_public() {
        let (_dir, repo) = repo().await;
        let mut stored = character("shared", GameSystem::Cthulhu6, &[], 0);
        stored.publish(|| "abc".to_string(), t0());
        repo.save(&stored).await.expect("save");

        let found = repo.get_public_by_token("abc").await.expect("lookup");
        assert_eq!(found.map(|c| c.id), Some(stored.id));

        stored.unpublish(t0());
        repo.save(&stored).await.expect("save");
        assert!(repo.get_public_by_token("abc").await.expect("lookup").is_none());
    }
}
