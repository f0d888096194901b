//! Character Service - character CRUD, sharing, export and images over REST

use sheetkeeper_domain::{AuditLogEntry, GameSystem};
use sheetkeeper_shared::{
    AutoRollRequest, AutoRollResponse, CharacterListQuery, CharacterListResponse,
    CharacterResponse, CocofoliaExportQuery, CocofoliaExportResponse, CreateCharacterRequest,
    ImageUploadUrlRequest, ImageUploadUrlResponse, PublishRequest, PublishResponse,
    UpdateCharacterRequest,
};
use uuid::Uuid;

use super::{path_segment, query_string};
use crate::ports::outbound::{ApiError, ApiPort};

/// Character operations for the signed-in (anonymous) user.
#[derive(Clone)]
pub struct CharacterService<A: ApiPort> {
    api: A,
}

impl<A: ApiPort> CharacterService<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub async fn list(&self, query: &CharacterListQuery) -> Result<CharacterListResponse, ApiError> {
        let path = format!("/api/characters{}", query_string(query.pairs()));
        self.api.get(&path).await
    }

    pub async fn create(
        &self,
        request: &CreateCharacterRequest,
    ) -> Result<CharacterResponse, ApiError> {
        self.api.post("/api/characters", request).await
    }

    pub async fn get(&self, id: Uuid) -> Result<CharacterResponse, ApiError> {
        self.api.get(&format!("/api/characters/{}", id)).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        request: &UpdateCharacterRequest,
    ) -> Result<CharacterResponse, ApiError> {
        self.api
            .put(&format!("/api/characters/{}", id), request)
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.api.delete(&format!("/api/characters/{}", id)).await
    }

    pub async fn set_public(&self, id: Uuid, is_public: bool) -> Result<PublishResponse, ApiError> {
        self.api
            .post(
                &format!("/api/characters/{}/publish", id),
                &PublishRequest { is_public },
            )
            .await
    }

    pub async fn auto_roll(
        &self,
        id: Uuid,
        system: GameSystem,
    ) -> Result<AutoRollResponse, ApiError> {
        self.api
            .post(
                &format!("/api/characters/{}/attributes/auto-roll", id),
                &AutoRollRequest { system },
            )
            .await
    }

    pub async fn export_cocofolia(
        &self,
        id: Uuid,
        query: &CocofoliaExportQuery,
    ) -> Result<CocofoliaExportResponse, ApiError> {
        let path = format!(
            "/api/characters/{}/export/cocofolia{}",
            id,
            query_string(query.pairs())
        );
        self.api.get(&path).await
    }

    pub async fn image_upload_url(
        &self,
        id: Uuid,
        mime_type: &str,
    ) -> Result<ImageUploadUrlResponse, ApiError> {
        self.api
            .post(
                &format!("/api/characters/{}/image/upload-url", id),
                &ImageUploadUrlRequest {
                    mime_type: mime_type.to_string(),
                },
            )
            .await
    }

    pub async fn audit_logs(&self, id: Uuid) -> Result<Vec<AuditLogEntry>, ApiError> {
        self.api
            .get(&format!("/api/characters/{}/audit-logs", id))
            .await
    }

    /// A public character by share token. Needs no identity.
    pub async fn shared(&self, token: &str) -> Result<CharacterResponse, ApiError> {
        self.api
            .get(&format!("/api/share/{}", path_segment(token)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use chrono::Utc;
    use mockall::predicate::eq;
    use serde_json::{json, Value};

    use crate::application::api::Api;
    use crate::ports::outbound::MockRawApiPort;

    fn character_json(id: Uuid) -> Value {
        json!({
            "id": id,
            "user_id": "user-1",
            "system": "cthulhu6",
            "name": "探索者",
            "tags": ["新規"],
            "profile_image_url": null,
            "sheet_data": {},
            "is_public": false,
            "share_token": null,
            "created_at": Utc::now(),
            "updated_at": Utc::now(),
        })
    }

    fn service(raw: MockRawApiPort) -> CharacterService<Api> {
        CharacterService::new(Api::new(Arc::new(raw)))
    }

    #[tokio::test]
    async fn list_sends_filters_as_query_string() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/api/characters?query=%E6%8E%A2&system=cthulhu6&sort=name_asc&page=2"))
            .times(1)
            .returning(|_| Ok(json!({"items": [], "total": 0, "page": 2, "limit": 20})));

        let query = CharacterListQuery {
            query: Some("探".to_string()),
            system: Some("cthulhu6".to_string()),
            sort: Some("name_asc".to_string()),
            page: Some(2),
            ..CharacterListQuery::default()
        };
        let page = service(raw).list(&query).await.expect("list");
        assert_eq!(page.page, 2);
        assert!(page.items.is_empty());
    }

    #[tokio::test]
    async fn create_posts_the_request_body() {
        let id = Uuid::new_v4();
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| {
                path == "/api/characters" && body["name"] == "探索者" && body["system"] == "cthulhu6"
            })
            .times(1)
            .returning(move |_, _| Ok(character_json(id)));

        let request = CreateCharacterRequest {
            system: GameSystem::Cthulhu6,
            name: "探索者".to_string(),
            tags: vec!["新規".to_string()],
            profile_image_url: None,
            sheet_data: None,
        };
        let created = service(raw).create(&request).await.expect("create");
        assert_eq!(created.id, id);
        assert_eq!(created.tags, vec!["新規".to_string()]);
    }

    #[tokio::test]
    async fn publish_and_export_paths() {
        let id = Uuid::new_v4();
        let mut raw = MockRawApiPort::new();
        let publish_path = format!("/api/characters/{}/publish", id);
        raw.expect_post_json()
            .withf(move |path, body| path == publish_path && body == &json!({"is_public": true}))
            .times(1)
            .returning(|_, _| Ok(json!({"is_public": true, "share_token": "abc"})));
        let export_path = format!(
            "/api/characters/{}/export/cocofolia?system=cthulhu6&skill_scope=all&dice=CC&include_icon=false",
            id
        );
        raw.expect_get_json()
            .with(eq(export_path))
            .times(1)
            .returning(|_| Err(ApiError::from_status(400, r#"{"detail":"bad"}"#)));

        let service = service(raw);
        let published = service.set_public(id, true).await.expect("publish");
        assert_eq!(published.share_token.as_deref(), Some("abc"));

        let mut query = CocofoliaExportQuery::new("cthulhu6");
        query.skill_scope = "all".to_string();
        query.dice = "CC".to_string();
        query.include_icon = false;
        let err = service
            .export_cocofolia(id, &query)
            .await
            .expect_err("rejected");
        assert_eq!(err.user_message(), "bad");
    }

    #[tokio::test]
    async fn shared_token_is_escaped() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .with(eq("/api/share/a%2Fb"))
            .times(1)
            .returning(|_| Err(ApiError::from_status(404, "")));

        let err = service(raw).shared("a/b").await.expect_err("missing");
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn delete_passes_through_errors() {
        let id = Uuid::new_v4();
        let mut raw = MockRawApiPort::new();
        raw.expect_delete()
            .times(1)
            .returning(|_| Err(ApiError::RequestFailed("offline".to_string())));

        let err = service(raw).delete(id).await.expect_err("offline");
        assert!(err.user_message().starts_with("ネットワークエラー"));
    }
}
