//! Character entity - a stored sheet with ownership and sharing state

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::game_system::GameSystem;
use crate::ids::{CharacterId, UserId};
use crate::sheets::{self, SheetData};
use crate::value_objects::{CharacterName, Tags};

/// A character owned by one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub system: GameSystem,
    pub name: CharacterName,
    pub profile_image_url: Option<String>,
    pub tags: Tags,
    pub is_public: bool,
    /// Present exactly while the character is public
    pub share_token: Option<String>,
    /// Sheet JSON in the stored format of `system`
    pub sheet_data: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CharacterUpdate {
    pub name: Option<CharacterName>,
    pub tags: Option<Tags>,
    /// `Some(None)` clears the image.
    pub profile_image_url: Option<Option<String>>,
    pub sheet_data: Option<Value>,
}

impl CharacterUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.tags.is_none()
            && self.profile_image_url.is_none()
            && self.sheet_data.is_none()
    }
}

impl Character {
    /// A private character with the system's template sheet.
    pub fn new(
        id: CharacterId,
        user_id: UserId,
        system: GameSystem,
        name: CharacterName,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            system,
            name,
            profile_image_url: None,
            tags: Tags::default(),
            is_public: false,
            share_token: None,
            sheet_data: sheets::template(system),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_profile_image_url(mut self, url: Option<String>) -> Self {
        self.profile_image_url = url.filter(|u| !u.trim().is_empty());
        self
    }

    /// Sets the sheet, keeping the template when `data` is blank.
    pub fn with_sheet_data(mut self, data: Value) -> Self {
        if !sheets::is_blank(&data) {
            self.sheet_data = data;
        }
        self
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Owners always see their characters; anyone else only public ones.
    pub fn can_view(&self, viewer: Option<&UserId>) -> bool {
        self.is_public || viewer.is_some_and(|v| self.is_owned_by(v))
    }

    /// Makes the character public, issuing a share token unless one exists.
    pub fn publish(&mut self, new_token: impl FnOnce() -> String, now: DateTime<Utc>) {
        self.is_public = true;
        if self.share_token.is_none() {
            self.share_token = Some(new_token());
        }
        self.updated_at = now;
    }

    /// Makes the character private and revokes its share token.
    pub fn unpublish(&mut self, now: DateTime<Utc>) {
        self.is_public = false;
        self.share_token = None;
        self.updated_at = now;
    }

    pub fn apply_update(&mut self, update: CharacterUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(tags) = update.tags {
            self.tags = tags;
        }
        if let Some(url) = update.profile_image_url {
            self.profile_image_url = url.filter(|u| !u.trim().is_empty());
        }
        if let Some(data) = update.sheet_data {
            self.sheet_data = data;
        }
        self.updated_at = now;
    }

    pub fn normalized_sheet(&self) -> SheetData {
        sheets::normalize(self.system, &self.sheet_data)
    }
}
