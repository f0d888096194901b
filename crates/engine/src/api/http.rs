//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use sheetkeeper_domain::{AuditLogEntry, Character, CharacterId, DomainError};
use sheetkeeper_shared::{
    AutoRollRequest, AutoRollResponse, CharacterListQuery, CharacterListResponse,
    CharacterResponse, CocofoliaExportQuery, CocofoliaExportResponse, CreateCharacterRequest,
    DiceRollRequest, DiceRollResponse, ErrorBody, ImageUploadUrlRequest, ImageUploadUrlResponse,
    MeResponse, PublishRequest, PublishResponse, SkillPointsErrorDetail, UpdateCharacterRequest,
};
use uuid::Uuid;

use super::auth::CurrentUser;
use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::CharacterError;

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/me", get(me))
        .route(
            "/api/characters",
            get(list_characters).post(create_character),
        )
        .route(
            "/api/characters/{id}",
            get(get_character)
                .put(update_character)
                .delete(delete_character),
        )
        .route("/api/characters/{id}/publish", post(publish_character))
        .route(
            "/api/characters/{id}/attributes/auto-roll",
            post(auto_roll_attributes),
        )
        .route(
            "/api/characters/{id}/export/cocofolia",
            get(export_cocofolia),
        )
        .route(
            "/api/characters/{id}/image/upload-url",
            post(image_upload_url),
        )
        .route("/api/characters/{id}/audit-logs", get(audit_logs))
        .route("/api/dice/roll", post(roll_dice))
        .route("/api/share/{token}", get(get_shared_character))
}

async fn health() -> &'static str {
    "OK"
}

async fn me(CurrentUser(user): CurrentUser) -> Json<MeResponse> {
    Json(MeResponse {
        id: user.as_str().to_string(),
    })
}

fn character_response(character: Character) -> CharacterResponse {
    CharacterResponse {
        id: character.id.to_uuid(),
        user_id: character.user_id.as_str().to_string(),
        system: character.system,
        name: character.name.as_str().to_string(),
        tags: character.tags.as_slice().to_vec(),
        profile_image_url: character.profile_image_url,
        sheet_data: character.sheet_data,
        is_public: character.is_public,
        share_token: character.share_token,
        created_at: character.created_at,
        updated_at: character.updated_at,
    }
}

async fn list_characters(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<CharacterListQuery>,
) -> Result<Json<CharacterListResponse>, ApiError> {
    let listing = app.use_cases.characters.list(&user, &query).await?;
    Ok(Json(CharacterListResponse {
        items: listing.items.into_iter().map(character_response).collect(),
        total: listing.total,
        page: listing.page,
        limit: listing.limit,
    }))
}

async fn create_character(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<(StatusCode, Json<CharacterResponse>), ApiError> {
    let character = app.use_cases.characters.create(&user, request).await?;
    Ok((StatusCode::CREATED, Json(character_response(character))))
}

async fn get_character(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app
        .use_cases
        .characters
        .get(&user, CharacterId::from_uuid(id))
        .await?;
    Ok(Json(character_response(character)))
}

async fn update_character(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCharacterRequest>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app
        .use_cases
        .characters
        .update(&user, CharacterId::from_uuid(id), request)
        .await?;
    Ok(Json(character_response(character)))
}

async fn delete_character(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .characters
        .delete(&user, CharacterId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn publish_character(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<PublishRequest>,
) -> Result<Json<PublishResponse>, ApiError> {
    let character = app
        .use_cases
        .characters
        .set_public(&user, CharacterId::from_uuid(id), request.is_public)
        .await?;
    Ok(Json(PublishResponse {
        is_public: character.is_public,
        share_token: character.share_token,
    }))
}

async fn auto_roll_attributes(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<AutoRollRequest>,
) -> Result<Json<AutoRollResponse>, ApiError> {
    let rolled = app
        .use_cases
        .dice
        .auto_roll(&user, CharacterId::from_uuid(id), request.system)
        .await?;
    Ok(Json(rolled))
}

async fn export_cocofolia(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Query(query): Query<CocofoliaExportQuery>,
) -> Result<Json<CocofoliaExportResponse>, ApiError> {
    let export = app
        .use_cases
        .export
        .cocofolia(&user, CharacterId::from_uuid(id), &query)
        .await?;
    Ok(Json(export))
}

async fn image_upload_url(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(request): Json<ImageUploadUrlRequest>,
) -> Result<Json<ImageUploadUrlResponse>, ApiError> {
    let urls = app
        .use_cases
        .images
        .upload_url(&user, CharacterId::from_uuid(id), &request.mime_type)
        .await?;
    Ok(Json(urls))
}

async fn audit_logs(
    State(app): State<Arc<App>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError> {
    let entries = app
        .use_cases
        .characters
        .audit_log(&user, CharacterId::from_uuid(id))
        .await?;
    Ok(Json(entries))
}

async fn roll_dice(
    State(app): State<Arc<App>>,
    Json(request): Json<DiceRollRequest>,
) -> Result<Json<DiceRollResponse>, ApiError> {
    let result = app.use_cases.dice.roll(&request.formula)?;
    Ok(Json(DiceRollResponse {
        rolls: result.individual_rolls,
        total: result.total,
    }))
}

async fn get_shared_character(
    State(app): State<Arc<App>>,
    Path(token): Path<String>,
) -> Result<Json<CharacterResponse>, ApiError> {
    let character = app.use_cases.characters.get_shared(&token).await?;
    Ok(Json(character_response(character)))
}

/// Error response; the body is always `{"detail": ...}`.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// 422 with a structured or plain detail.
    Unprocessable(serde_json::Value),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorBody::message(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorBody::message(msg)),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::message(msg)),
            ApiError::Unprocessable(detail) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody { detail })
            }
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::message("Internal server error"),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<CharacterError> for ApiError {
    fn from(e: CharacterError) -> Self {
        let message = e.to_string();
        match e {
            CharacterError::NotFound | CharacterError::SharedNotFound => {
                ApiError::NotFound(message)
            }
            CharacterError::Forbidden => ApiError::Forbidden(message),
            CharacterError::InvalidInput(msg) => ApiError::BadRequest(msg),
            CharacterError::Validation(msg) => {
                ApiError::Unprocessable(serde_json::Value::String(msg))
            }
            CharacterError::SkillPointsExceeded(violations) => {
                let detail = SkillPointsErrorDetail::new(
                    violations.iter().map(ToString::to_string).collect(),
                );
                ApiError::Unprocessable(serde_json::to_value(detail).unwrap_or_default())
            }
            CharacterError::Domain(DomainError::Validation(msg)) => {
                ApiError::Unprocessable(serde_json::Value::String(msg))
            }
            CharacterError::Domain(other) => ApiError::BadRequest(other.to_string()),
            CharacterError::Repo(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::app::AppConfig;
    use crate::infrastructure::clock::{FixedClock, SystemRandom};
    use crate::infrastructure::persistence::{self, SqliteAuditLogRepo, SqliteCharacterRepo};

    async fn router() -> (tempfile::TempDir, Router) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("api.db");
        let pool = persistence::connect(&path.to_string_lossy())
            .await
            .expect("connect");
        let app = App::with_ports(
            Arc::new(SqliteCharacterRepo::new(pool.clone())),
            Arc::new(SqliteAuditLogRepo::new(pool)),
            Arc::new(FixedClock(chrono::Utc::now())),
            Arc::new(SystemRandom),
            AppConfig {
                storage_base_url: "https://storage.test".to_string(),
                public_base_url: "https://sheets.test".to_string(),
                ..AppConfig::default()
            },
        );
        (dir, routes().with_state(Arc::new(app)))
    }

    async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            request = request.header("x-user-id", user);
        }
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .expect("request");

        let response = router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
        (status, value)
    }

    async fn create(router: &Router, user: &str, body: Value) -> Value {
        let (status, created) =
            send(router, Method::POST, "/api/characters", Some(user), Some(body)).await;
        assert_eq!(status, StatusCode::CREATED, "{created}");
        created
    }

    #[tokio::test]
    async fn health_and_me() {
        let (_dir, router) = router().await;
        let (status, body) = send(&router, Method::GET, "/api/health", None, None).await;
        assert_eq!((status, body), (StatusCode::OK, json!("OK")));

        let (status, body) = send(&router, Method::GET, "/api/me", Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "alice"}));
    }

    #[tokio::test]
    async fn character_routes_require_user_header() {
        let (_dir, router) = router().await;
        let (status, body) = send(&router, Method::GET, "/api/characters", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn create_read_update_delete() {
        let (_dir, router) = router().await;
        let created = create(
            &router,
            "alice",
            json!({"system": "cthulhu6", "name": "探索者", "tags": ["pc"]}),
        )
        .await;
        let id = created["id"].as_str().expect("id").to_string();
        assert_eq!(created["sheet_data"]["attributes"]["STR"], json!(0));
        assert_eq!(created["is_public"], json!(false));

        let uri = format!("/api/characters/{id}");
        let (status, _) = send(&router, Method::GET, &uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, body) = send(&router, Method::GET, &uri, Some("mallory"), None).await;
        assert_eq!((status, body), (StatusCode::FORBIDDEN, json!({"detail": "Access denied"})));

        let (status, updated) = send(
            &router,
            Method::PUT,
            &uri,
            Some("alice"),
            Some(json!({"name": "改名", "tags": ["pc", "長編"]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["name"], json!("改名"));
        assert_eq!(updated["tags"], json!(["pc", "長編"]));

        let (status, log) = send(
            &router,
            Method::GET,
            &format!("{uri}/audit-logs"),
            Some("alice"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let actions: Vec<&str> = log
            .as_array()
            .expect("entries")
            .iter()
            .filter_map(|e| e["action"].as_str())
            .collect();
        assert_eq!(actions, vec!["create", "update"]);

        let (status, _) = send(&router, Method::DELETE, &uri, Some("alice"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&router, Method::GET, &uri, Some("alice"), None).await;
        assert_eq!(
            (status, body),
            (StatusCode::NOT_FOUND, json!({"detail": "Character not found"}))
        );
    }

    #[tokio::test]
    async fn skill_point_overflow_is_422_with_details() {
        let (_dir, router) = router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/characters",
            Some("alice"),
            Some(json!({
                "system": "cthulhu6",
                "name": "x",
                "sheet_data": {
                    "attributes": {"EDU": 10, "INT": 10},
                    "skills": [{"name": "目星", "baseValue": 25, "interestPoints": 150}]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"]["error"], json!("skill_points_limit_exceeded"));
        assert_eq!(
            body["detail"]["details"],
            json!(["興味Pの上限を超えています: 150/100 (INT × 10)"])
        );
    }

    #[tokio::test]
    async fn oversized_sheet_numbers_do_not_break_updates() {
        let (_dir, router) = router().await;
        let created = create(&router, "alice", json!({"system": "cthulhu6", "name": "x"})).await;
        let uri = format!("/api/characters/{}", created["id"].as_str().expect("id"));

        let (status, body) = send(
            &router,
            Method::PUT,
            &uri,
            Some("alice"),
            Some(json!({
                "sheet_data": {
                    "attributes": {"EDU": 10},
                    "skills": [
                        {"name": "目星", "jobPoints": 2147483647},
                        {"name": "聞き耳", "jobPoints": 2147483647}
                    ]
                }
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body["detail"]["details"],
            json!(["職業Pの上限を超えています: 1999998/200 (EDU × 20)"])
        );

        let (status, updated) = send(
            &router,
            Method::PUT,
            &uri,
            Some("alice"),
            Some(json!({
                "sheet_data": {"attributes": {"STR": 2147483647, "SIZ": 10, "POW": "1e20"}}
            })),
        )
        .await;
        // Sheets are stored as sent; only the limit check reads the numbers.
        assert_eq!(status, StatusCode::OK, "{updated}");
        assert_eq!(updated["sheet_data"]["attributes"]["STR"], json!(2147483647));
    }

    #[tokio::test]
    async fn list_filters_and_rejects_bad_sort() {
        let (_dir, router) = router().await;
        create(&router, "alice", json!({"system": "cthulhu7", "name": "Alpha", "tags": ["a"]})).await;
        create(&router, "alice", json!({"system": "shinobigami", "name": "Beta"})).await;
        create(&router, "bob", json!({"system": "cthulhu7", "name": "Alpha Bob"})).await;

        let (status, body) = send(
            &router,
            Method::GET,
            "/api/characters?query=alp&sort=name_asc",
            Some("alice"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], json!(1));
        assert_eq!(body["items"][0]["name"], json!("Alpha"));
        assert_eq!((body["page"].clone(), body["limit"].clone()), (json!(1), json!(20)));

        let (status, body) = send(
            &router,
            Method::GET,
            "/api/characters?sort=newest",
            Some("alice"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"detail": "Invalid sort option: newest"}));

        let (status, _) = send(
            &router,
            Method::GET,
            "/api/characters?limit=500",
            Some("alice"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn publish_then_share_then_unpublish() {
        let (_dir, router) = router().await;
        let created = create(&router, "alice", json!({"system": "sw25", "name": "剣士"})).await;
        let uri = format!("/api/characters/{}/publish", created["id"].as_str().expect("id"));

        let (status, published) = send(
            &router,
            Method::POST,
            &uri,
            Some("alice"),
            Some(json!({"is_public": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let token = published["share_token"].as_str().expect("token").to_string();

        let share_uri = format!("/api/share/{token}");
        let (status, shared) = send(&router, Method::GET, &share_uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(shared["name"], json!("剣士"));

        let (status, hidden) = send(
            &router,
            Method::POST,
            &uri,
            Some("alice"),
            Some(json!({"is_public": false})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hidden, json!({"is_public": false, "share_token": null}));

        let (status, body) = send(&router, Method::GET, &share_uri, None, None).await;
        assert_eq!(
            (status, body),
            (
                StatusCode::NOT_FOUND,
                json!({"detail": "Character not found or not public"})
            )
        );
    }

    #[tokio::test]
    async fn dice_roll_validates_formula() {
        let (_dir, router) = router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/api/dice/roll",
            None,
            Some(json!({"formula": "3d6"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let rolls = body["rolls"].as_array().expect("rolls");
        assert_eq!(rolls.len(), 3);
        let total: i64 = rolls.iter().filter_map(Value::as_i64).sum();
        assert_eq!(body["total"], json!(total));

        let (status, _) = send(
            &router,
            Method::POST,
            "/api/dice/roll",
            None,
            Some(json!({"formula": "1d1"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn image_upload_url_checks_mime_type() {
        let (_dir, router) = router().await;
        let created = create(&router, "alice", json!({"system": "satasupe", "name": "x"})).await;
        let uri = format!(
            "/api/characters/{}/image/upload-url",
            created["id"].as_str().expect("id")
        );

        let (status, body) = send(
            &router,
            Method::POST,
            &uri,
            Some("alice"),
            Some(json!({"mime_type": "image/png"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let upload = body["upload_url"].as_str().expect("upload url");
        assert!(upload.starts_with("https://storage.test/upload/"));
        assert!(upload.ends_with(".png"));

        let (status, _) = send(
            &router,
            Method::POST,
            &uri,
            Some("alice"),
            Some(json!({"mime_type": "image/webp"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
