//! Profile image upload URLs.
//!
//! Object storage is not signed; URLs are derived from a configured base.

use std::sync::Arc;

use chrono::Duration;
use sheetkeeper_domain::{CharacterId, UserId};
use sheetkeeper_shared::ImageUploadUrlResponse;

use crate::infrastructure::ports::{CharacterRepo, ClockPort, RandomPort};
use crate::use_cases::characters::{load_owned, CharacterError};

const ALLOWED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/jpg"];
const UPLOAD_URL_TTL_MINUTES: i64 = 60;

pub struct ImageUseCases {
    characters: Arc<dyn CharacterRepo>,
    clock: Arc<dyn ClockPort>,
    random: Arc<dyn RandomPort>,
    storage_base_url: String,
}

impl ImageUseCases {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
        storage_base_url: impl Into<String>,
    ) -> Self {
        Self {
            characters,
            clock,
            random,
            storage_base_url: storage_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn upload_url(
        &self,
        user_id: &UserId,
        id: CharacterId,
        mime_type: &str,
    ) -> Result<ImageUploadUrlResponse, CharacterError> {
        let character = load_owned(self.characters.as_ref(), user_id, id).await?;

        let extension = match mime_type {
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpg",
            _ => {
                return Err(CharacterError::invalid_input(format!(
                    "Invalid mime_type. Allowed types: {}",
                    ALLOWED_MIME_TYPES.join(", ")
                )))
            }
        };

        let file_name = format!(
            "{}/{}.{}",
            character.id,
            self.random.uuid(),
            extension
        );
        Ok(ImageUploadUrlResponse {
            upload_url: format!("{}/upload/{}", self.storage_base_url, file_name),
            public_url: format!("{}/public/{}", self.storage_base_url, file_name),
            expires_at: self.clock.now() + Duration::minutes(UPLOAD_URL_TTL_MINUTES),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use sheetkeeper_domain::{Character, CharacterName, GameSystem};

    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::MockCharacterRepo;

    fn images() -> (ImageUseCases, CharacterId) {
        let character = Character::new(
            CharacterId::new(),
            UserId::new("owner").expect("user"),
            GameSystem::Cthulhu6,
            CharacterName::new("x").expect("name"),
            Utc::now(),
        );
        let id = character.id;
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        let now = Utc.timestamp_opt(1_700_000_000, 0).single().expect("time");
        let uc = ImageUseCases::new(
            Arc::new(repo),
            Arc::new(FixedClock(now)),
            Arc::new(FixedRandom(1)),
            "https://storage.example.com/",
        );
        (uc, id)
    }

    #[tokio::test]
    async fn builds_urls_under_character_prefix() {
        let (uc, id) = images();
        let response = uc
            .upload_url(&UserId::new("owner").expect("user"), id, "image/jpeg")
            .await
            .expect("upload url");

        let expected = format!("{}/{}.jpg", id, uuid::Uuid::nil());
        assert_eq!(
            response.upload_url,
            format!("https://storage.example.com/upload/{expected}")
        );
        assert_eq!(
            response.public_url,
            format!("https://storage.example.com/public/{expected}")
        );
        assert_eq!(response.expires_at.timestamp(), 1_700_000_000 + 3600);
    }

    #[tokio::test]
    async fn rejects_other_mime_types() {
        let (uc, id) = images();
        let err = uc
            .upload_url(&UserId::new("owner").expect("user"), id, "image/gif")
            .await
            .expect_err("gif");
        match err {
            CharacterError::InvalidInput(message) => assert_eq!(
                message,
                "Invalid mime_type. Allowed types: image/png, image/jpeg, image/jpg"
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
