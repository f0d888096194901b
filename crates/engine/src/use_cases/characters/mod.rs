//! Character CRUD, listing, publishing and the audit trail.

mod error;

pub use error::CharacterError;

use std::sync::Arc;

use sheetkeeper_domain::{
    sheets, AuditAction, AuditLogEntry, AuditLogId, Character, CharacterId, CharacterName,
    CharacterUpdate, DomainError, GameSystem, Tags, UserId,
};
use sheetkeeper_shared::{CharacterListQuery, CreateCharacterRequest, UpdateCharacterRequest};

use crate::infrastructure::ports::{
    AuditLogRepo, CharacterFilter, CharacterRepo, ClockPort, RandomPort,
};

/// One page of a listing together with the paging that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterListing {
    pub items: Vec<Character>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Loads a character the caller owns.
pub(crate) async fn load_owned(
    repo: &dyn CharacterRepo,
    user_id: &UserId,
    id: CharacterId,
) -> Result<Character, CharacterError> {
    let character = repo.get(id).await?.ok_or(CharacterError::NotFound)?;
    if !character.is_owned_by(user_id) {
        return Err(CharacterError::Forbidden);
    }
    Ok(character)
}

fn parse_name(name: &str) -> Result<CharacterName, CharacterError> {
    CharacterName::new(name).map_err(|e| match e {
        DomainError::Validation(message) => CharacterError::Validation(message),
        other => CharacterError::Domain(other),
    })
}

fn check_skill_points(system: GameSystem, data: &serde_json::Value) -> Result<(), CharacterError> {
    sheets::check_skill_points(system, data).map_err(CharacterError::SkillPointsExceeded)
}

pub struct CharacterUseCases {
    characters: Arc<dyn CharacterRepo>,
    audit: Arc<dyn AuditLogRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
}

impl CharacterUseCases {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        audit: Arc<dyn AuditLogRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        Self {
            characters,
            audit,
            clock,
            random,
        }
    }

    async fn record(
        &self,
        user_id: &UserId,
        character_id: CharacterId,
        action: AuditAction,
    ) -> Result<(), CharacterError> {
        let entry = AuditLogEntry::new(
            AuditLogId::from_uuid(self.random.uuid()),
            user_id.clone(),
            character_id,
            action,
            self.clock.now(),
        );
        self.audit.record(&entry).await?;
        Ok(())
    }

    /// 64 hex characters from two random UUIDs.
    fn new_share_token(&self) -> String {
        format!(
            "{}{}",
            self.random.uuid().simple(),
            self.random.uuid().simple()
        )
    }

    pub async fn list(
        &self,
        user_id: &UserId,
        query: &CharacterListQuery,
    ) -> Result<CharacterListing, CharacterError> {
        let invalid = |e: sheetkeeper_shared::QueryError| CharacterError::invalid_input(e.to_string());
        let system = match query.system.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(s) => Some(
                s.parse::<GameSystem>()
                    .map_err(|_| CharacterError::invalid_input(format!("Invalid system: {s}")))?,
            ),
        };
        let filter = CharacterFilter {
            name_contains: query
                .query
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            tags: query.tags.as_deref().map(Tags::parse_csv).unwrap_or_default(),
            system,
            sort: query.sort().map_err(invalid)?,
            page: query.page().map_err(invalid)?,
            limit: query.limit().map_err(invalid)?,
        };

        let page = self.characters.list_for_user(user_id, &filter).await?;
        Ok(CharacterListing {
            items: page.items,
            total: page.total,
            page: filter.page,
            limit: filter.limit,
        })
    }

    pub async fn create(
        &self,
        user_id: &UserId,
        request: CreateCharacterRequest,
    ) -> Result<Character, CharacterError> {
        let name = parse_name(&request.name)?;
        let now = self.clock.now();
        let character = Character::new(
            CharacterId::from_uuid(self.random.uuid()),
            user_id.clone(),
            request.system,
            name,
            now,
        )
        .with_tags(Tags::new(request.tags))
        .with_profile_image_url(request.profile_image_url)
        .with_sheet_data(request.sheet_data.unwrap_or_default());

        check_skill_points(character.system, &character.sheet_data)?;

        self.characters.save(&character).await?;
        self.record(user_id, character.id, AuditAction::Create).await?;

        tracing::info!(
            character_id = %character.id,
            user_id = %user_id,
            system = %character.system,
            "Character created"
        );
        Ok(character)
    }

    /// The owner sees any of their characters; others only public ones.
    pub async fn get(&self, viewer: &UserId, id: CharacterId) -> Result<Character, CharacterError> {
        let character = self
            .characters
            .get(id)
            .await?
            .ok_or(CharacterError::NotFound)?;
        if !character.can_view(Some(viewer)) {
            return Err(CharacterError::Forbidden);
        }
        Ok(character)
    }

    pub async fn update(
        &self,
        user_id: &UserId,
        id: CharacterId,
        request: UpdateCharacterRequest,
    ) -> Result<Character, CharacterError> {
        let mut character = load_owned(self.characters.as_ref(), user_id, id).await?;

        let update = CharacterUpdate {
            name: request.name.as_deref().map(parse_name).transpose()?,
            tags: request.tags.map(Tags::new),
            profile_image_url: request
                .profile_image_url
                .map(|url| Some(url).filter(|u| !u.trim().is_empty())),
            sheet_data: request.sheet_data,
        };
        if let Some(data) = &update.sheet_data {
            check_skill_points(character.system, data)?;
        }

        character.apply_update(update, self.clock.now());
        self.characters.save(&character).await?;
        self.record(user_id, character.id, AuditAction::Update).await?;

        tracing::info!(character_id = %character.id, "Character updated");
        Ok(character)
    }

    pub async fn delete(&self, user_id: &UserId, id: CharacterId) -> Result<(), CharacterError> {
        let character = load_owned(self.characters.as_ref(), user_id, id).await?;

        self.record(user_id, character.id, AuditAction::Delete).await?;
        self.characters.delete(character.id).await?;

        tracing::info!(character_id = %character.id, "Character deleted");
        Ok(())
    }

    /// Publishing keeps an existing token; unpublishing revokes it.
    pub async fn set_public(
        &self,
        user_id: &UserId,
        id: CharacterId,
        is_public: bool,
    ) -> Result<Character, CharacterError> {
        let mut character = load_owned(self.characters.as_ref(), user_id, id).await?;
        let now = self.clock.now();

        let action = if is_public {
            character.publish(|| self.new_share_token(), now);
            AuditAction::Publish
        } else {
            character.unpublish(now);
            AuditAction::Unpublish
        };

        self.characters.save(&character).await?;
        self.record(user_id, character.id, action).await?;

        tracing::info!(character_id = %character.id, is_public, "Character visibility changed");
        Ok(character)
    }

    pub async fn get_shared(&self, token: &str) -> Result<Character, CharacterError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CharacterError::SharedNotFound);
        }
        self.characters
            .get_public_by_token(token)
            .await?
            .ok_or(CharacterError::SharedNotFound)
    }

    /// Audit entries of an owned character, oldest first.
    pub async fn audit_log(
        &self,
        user_id: &UserId,
        id: CharacterId,
    ) -> Result<Vec<AuditLogEntry>, CharacterError> {
        let character = load_owned(self.characters.as_ref(), user_id, id).await?;
        Ok(self.audit.list_for_character(character.id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::json;
    use sheetkeeper_domain::sheets::cthulhu::SkillPointViolation;
    use uuid::Uuid;

    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{
        CharacterPage, MockAuditLogRepo, MockCharacterRepo, MockRandomPort,
    };

    fn now() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).single().expect("time")
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).expect("user id")
    }

    fn sequential_random() -> MockRandomPort {
        let mut random = MockRandomPort::new();
        let mut next = 0u128;
        random.expect_uuid().returning(move || {
            next += 1;
            Uuid::from_u128(next)
        });
        random
    }

    fn stored(owner: &str, system: GameSystem) -> Character {
        Character::new(
            CharacterId::new(),
            user(owner),
            system,
            CharacterName::new("探索者").expect("name"),
            now(),
        )
    }

    fn use_cases(characters: MockCharacterRepo, audit: MockAuditLogRepo) -> CharacterUseCases {
        CharacterUseCases::new(
            Arc::new(characters),
            Arc::new(audit),
            Arc::new(FixedClock(now())),
            Arc::new(sequential_random()),
        )
    }

    fn audit_expecting(action: AuditAction) -> MockAuditLogRepo {
        let mut audit = MockAuditLogRepo::new();
        audit
            .expect_record()
            .withf(move |entry| entry.action == action)
            .times(1)
            .returning(|_| Ok(()));
        audit
    }

    #[tokio::test]
    async fn create_fills_template_and_records_audit() {
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_save()
            .withf(|c| {
                c.name.as_str() == "新しい探索者"
                    && c.sheet_data == sheets::template(GameSystem::Cthulhu6)
                    && c.tags.as_slice() == ["pc"]
                    && !c.is_public
            })
            .times(1)
            .returning(|_| Ok(()));

        let request = CreateCharacterRequest {
            system: GameSystem::Cthulhu6,
            name: "  新しい探索者 ".to_string(),
            tags: vec!["pc".to_string(), " pc ".to_string(), "".to_string()],
            profile_image_url: None,
            sheet_data: Some(json!({})),
        };
        let created = use_cases(characters, audit_expecting(AuditAction::Create))
            .create(&user("u1"), request)
            .await
            .expect("create");

        assert_eq!(created.user_id, user("u1"));
        assert_eq!(created.created_at, now());
        assert_eq!(created.id, CharacterId::from_uuid(Uuid::from_u128(1)));
    }

    #[tokio::test]
    async fn create_rejects_blank_name() {
        let request = CreateCharacterRequest {
            system: GameSystem::Shinobigami,
            name: "   ".to_string(),
            tags: Vec::new(),
            profile_image_url: None,
            sheet_data: None,
        };
        let err = use_cases(MockCharacterRepo::new(), MockAuditLogRepo::new())
            .create(&user("u1"), request)
            .await
            .expect_err("blank name");
        assert!(matches!(err, CharacterError::Validation(_)));
    }

    #[tokio::test]
    async fn create_rejects_skill_points_over_limit() {
        let request = CreateCharacterRequest {
            system: GameSystem::Cthulhu6,
            name: "x".to_string(),
            tags: Vec::new(),
            profile_image_url: None,
            sheet_data: Some(json!({
                "attributes": {"EDU": 10, "INT": 10},
                "skills": [{"name": "目星", "baseValue": 25, "jobPoints": 250, "interestPoints": 0}]
            })),
        };
        let err = use_cases(MockCharacterRepo::new(), MockAuditLogRepo::new())
            .create(&user("u1"), request)
            .await
            .expect_err("over limit");
        match err {
            CharacterError::SkillPointsExceeded(violations) => assert_eq!(
                violations,
                vec![SkillPointViolation::JobPoints {
                    used: 250,
                    limit: 200
                }]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_allows_owner_or_public() {
        let private = stored("owner", GameSystem::Cthulhu7);
        let private_id = private.id;
        let mut public = stored("owner", GameSystem::Cthulhu7);
        public.publish(|| "t".to_string(), now());
        let public_id = public.id;

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .withf(move |id| *id == private_id)
            .returning(move |_| Ok(Some(private.clone())));
        characters
            .expect_get()
            .withf(move |id| *id == public_id)
            .returning(move |_| Ok(Some(public.clone())));
        characters
            .expect_get()
            .withf(move |id| *id != private_id && *id != public_id)
            .returning(|_| Ok(None));
        let uc = use_cases(characters, MockAuditLogRepo::new());

        uc.get(&user("owner"), private_id).await.expect("owner sees private");
        uc.get(&user("other"), public_id).await.expect("anyone sees public");
        let err = uc.get(&user("other"), private_id).await.expect_err("forbidden");
        assert!(matches!(err, CharacterError::Forbidden));
        let err = uc
            .get(&user("owner"), CharacterId::new())
            .await
            .expect_err("missing");
        assert!(matches!(err, CharacterError::NotFound));
    }

    #[tokio::test]
    async fn update_applies_partial_changes() {
        let existing = stored("owner", GameSystem::Shinobigami)
            .with_profile_image_url(Some("https://img.example/a.png".to_string()));
        let id = existing.id;

        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(existing.clone())));
        characters
            .expect_save()
            .withf(|c| {
                c.name.as_str() == "改名"
                    && c.profile_image_url.is_none()
                    && c.system == GameSystem::Shinobigami
            })
            .times(1)
            .returning(|_| Ok(()));

        let request = UpdateCharacterRequest {
            name: Some("改名".to_string()),
            profile_image_url: Some(String::new()),
            ..UpdateCharacterRequest::default()
        };
        let updated = use_cases(characters, audit_expecting(AuditAction::Update))
            .update(&user("owner"), id, request)
            .await
            .expect("update");
        assert_eq!(updated.tags, Tags::default());
    }

    #[tokio::test]
    async fn update_by_other_user_is_forbidden() {
        let existing = stored("owner", GameSystem::Sw25);
        let id = existing.id;
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(existing.clone())));
        characters.expect_save().never();

        let err = use_cases(characters, MockAuditLogRepo::new())
            .update(&user("intruder"), id, UpdateCharacterRequest::default())
            .await
            .expect_err("forbidden");
        assert!(matches!(err, CharacterError::Forbidden));
    }

    #[tokio::test]
    async fn delete_records_audit_before_removing() {
        let existing = stored("owner", GameSystem::Satasupe);
        let id = existing.id;
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(existing.clone())));
        characters
            .expect_delete()
            .withf(move |deleted| *deleted == id)
            .times(1)
            .returning(|_| Ok(()));

        use_cases(characters, audit_expecting(AuditAction::Delete))
            .delete(&user("owner"), id)
            .await
            .expect("delete");
    }

    #[tokio::test]
    async fn publish_issues_token_once_and_unpublish_clears_it() {
        let existing = stored("owner", GameSystem::Cthulhu6);
        let id = existing.id;
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(existing.clone())));
        characters.expect_save().returning(|_| Ok(()));
        let mut audit = MockAuditLogRepo::new();
        audit.expect_record().returning(|_| Ok(()));
        let uc = use_cases(characters, audit);

        let published = uc.set_public(&user("owner"), id, true).await.expect("publish");
        let token = published.share_token.expect("token");
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        let hidden = uc.set_public(&user("owner"), id, false).await.expect("unpublish");
        assert!(!hidden.is_public);
        assert!(hidden.share_token.is_none());
    }

    #[tokio::test]
    async fn shared_lookup_maps_missing_to_shared_not_found() {
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get_public_by_token()
            .withf(|token| token == "abc")
            .returning(|_| Ok(None));

        let uc = use_cases(characters, MockAuditLogRepo::new());
        let err = uc.get_shared("abc").await.expect_err("missing");
        assert!(matches!(err, CharacterError::SharedNotFound));
        let err = uc.get_shared("  ").await.expect_err("blank");
        assert!(matches!(err, CharacterError::SharedNotFound));
    }

    #[tokio::test]
    async fn list_translates_query_into_filter() {
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_list_for_user()
            .withf(|owner, filter| {
                owner.as_str() == "u1"
                    && filter.name_contains.as_deref() == Some("alice")
                    && filter.tags == Tags::new(["a", "b"])
                    && filter.system == Some(GameSystem::Cthulhu6)
                    && filter.page == 2
                    && filter.limit == 5
            })
            .returning(|_, _| {
                Ok(CharacterPage {
                    items: Vec::new(),
                    total: 7,
                })
            });

        let query = CharacterListQuery {
            query: Some(" alice ".to_string()),
            tags: Some("a, b".to_string()),
            system: Some("cthulhu".to_string()),
            sort: None,
            page: Some(2),
            limit: Some(5),
        };
        let listing = use_cases(characters, MockAuditLogRepo::new())
            .list(&user("u1"), &query)
            .await
            .expect("list");
        assert_eq!((listing.total, listing.page, listing.limit), (7, 2, 5));
    }

    #[tokio::test]
    async fn list_rejects_bad_parameters() {
        let uc = use_cases(MockCharacterRepo::new(), MockAuditLogRepo::new());
        for query in [
            CharacterListQuery {
                sort: Some("newest".to_string()),
                ..CharacterListQuery::default()
            },
            CharacterListQuery {
                page: Some(0),
                ..CharacterListQuery::default()
            },
            CharacterListQuery {
                limit: Some(101),
                ..CharacterListQuery::default()
            },
            CharacterListQuery {
                system: Some("dnd".to_string()),
                ..CharacterListQuery::default()
            },
        ] {
            let err = uc.list(&user("u1"), &query).await.expect_err("bad query");
            assert!(matches!(err, CharacterError::InvalidInput(_)), "{query:?}");
        }
    }
}
