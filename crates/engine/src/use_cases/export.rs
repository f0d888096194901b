//! Cocofolia clipboard export.

use std::sync::Arc;

use sheetkeeper_domain::{
    CharacterId, DiceStyle, ExportInput, ExportOptions, ExporterRegistry, GameSystem, SkillScope,
    UserId,
};
use sheetkeeper_shared::{CocofoliaExportMeta, CocofoliaExportQuery, CocofoliaExportResponse};

use crate::infrastructure::ports::CharacterRepo;
use crate::use_cases::characters::{load_owned, CharacterError};

pub struct ExportUseCases {
    characters: Arc<dyn CharacterRepo>,
    exporters: ExporterRegistry,
    /// Origin of the share pages, without a trailing slash.
    public_base_url: String,
}

impl ExportUseCases {
    pub fn new(
        characters: Arc<dyn CharacterRepo>,
        exporters: ExporterRegistry,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            characters,
            exporters,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn options(query: &CocofoliaExportQuery) -> Result<ExportOptions, CharacterError> {
        let invalid = |e: sheetkeeper_domain::DomainError| CharacterError::invalid_input(e.to_string());
        Ok(ExportOptions {
            system: query.system.parse::<GameSystem>().map_err(invalid)?,
            skill_scope: query.skill_scope.parse::<SkillScope>().map_err(invalid)?,
            dice: query.dice.parse::<DiceStyle>().map_err(invalid)?,
            include_icon: query.include_icon,
        })
    }

    pub async fn cocofolia(
        &self,
        user_id: &UserId,
        id: CharacterId,
        query: &CocofoliaExportQuery,
    ) -> Result<CocofoliaExportResponse, CharacterError> {
        let options = Self::options(query)?;
        let character = load_owned(self.characters.as_ref(), user_id, id).await?;

        if character.system != options.system {
            return Err(CharacterError::system_mismatch(character.system, options.system));
        }
        let exporter = self.exporters.get(options.system).ok_or_else(|| {
            CharacterError::invalid_input(format!(
                "Cocofolia export is not supported for system: {}",
                options.system
            ))
        })?;

        let share_url = match (&character.share_token, character.is_public) {
            (Some(token), true) => Some(format!("{}/share/{}", self.public_base_url, token)),
            _ => None,
        };
        let icon_url = character
            .profile_image_url
            .as_deref()
            .filter(|_| options.include_icon);

        let input = ExportInput {
            name: character.name.as_str(),
            sheet_data: &character.sheet_data,
            share_url: share_url.as_deref(),
            icon_url,
        };
        let clipboard = exporter.clipboard(&input, &options)?;

        tracing::info!(
            character_id = %character.id,
            system = %options.system,
            skill_scope = options.skill_scope.as_str(),
            "Cocofolia export generated"
        );

        Ok(CocofoliaExportResponse {
            clipboard_text: clipboard.to_clipboard_text(),
            clipboard,
            meta: CocofoliaExportMeta {
                system: options.system,
                skill_scope: options.skill_scope.as_str().to_string(),
                dice: options.dice.as_str().to_string(),
                include_icon: options.include_icon,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;
    use sheetkeeper_domain::{Character, CharacterName};

    use crate::infrastructure::ports::MockCharacterRepo;

    fn owner() -> UserId {
        UserId::new("owner").expect("user")
    }

    fn character(system: GameSystem) -> Character {
        Character::new(
            CharacterId::new(),
            owner(),
            system,
            CharacterName::new("クトゥルフ太郎").expect("name"),
            Utc::now(),
        )
        .with_profile_image_url(Some("https://img.example/icon.png".to_string()))
        .with_sheet_data(json!({
            "attributes": {"STR": 10, "CON": 12, "POW": 14, "DEX": 9, "APP": 11, "SIZ": 13, "INT": 15, "EDU": 16},
            "skills": [{"name": "目星", "baseValue": 25, "jobPoints": 40}]
        }))
    }

    fn export(character: Character) -> ExportUseCases {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        ExportUseCases::new(
            Arc::new(repo),
            ExporterRegistry::with_builtin(),
            "https://sheets.example/",
        )
    }

    #[tokio::test]
    async fn exports_public_character_with_share_url() {
        let mut stored = character(GameSystem::Cthulhu6);
        stored.publish(|| "tok".to_string(), Utc::now());
        let id = stored.id;

        let response = export(stored)
            .cocofolia(&owner(), id, &CocofoliaExportQuery::new("cthulhu6"))
            .await
            .expect("export");

        let data = &response.clipboard.data;
        assert_eq!(data.name, "クトゥルフ太郎");
        assert_eq!(data.external_url.as_deref(), Some("https://sheets.example/share/tok"));
        assert_eq!(data.icon_url.as_deref(), Some("https://img.example/icon.png"));
        assert!(data.commands.contains("CCB<=65 【目星】"));
        assert_eq!(response.meta.dice, "CCB");
        assert_eq!(response.meta.skill_scope, "changed");

        let parsed: serde_json::Value =
            serde_json::from_str(&response.clipboard_text).expect("clipboard json");
        assert_eq!(parsed["kind"], "character");
    }

    #[tokio::test]
    async fn private_character_has_no_share_url_and_icon_can_be_omitted() {
        let stored = character(GameSystem::Cthulhu7);
        let id = stored.id;
        let mut query = CocofoliaExportQuery::new("cthulhu7");
        query.include_icon = false;
        query.dice = "CC".to_string();

        let response = export(stored)
            .cocofolia(&owner(), id, &query)
            .await
            .expect("export");

        assert!(response.clipboard.data.external_url.is_none());
        assert!(response.clipboard.data.icon_url.is_none());
        assert!(response.clipboard.data.commands.starts_with("CC<="));
    }

    #[tokio::test]
    async fn rejects_mismatched_and_unsupported_systems() {
        let stored = character(GameSystem::Cthulhu6);
        let id = stored.id;
        let err = export(stored)
            .cocofolia(&owner(), id, &CocofoliaExportQuery::new("cthulhu7"))
            .await
            .expect_err("mismatch");
        assert!(matches!(err, CharacterError::InvalidInput(_)));

        let stored = character(GameSystem::Shinobigami);
        let id = stored.id;
        let err = export(stored)
            .cocofolia(&owner(), id, &CocofoliaExportQuery::new("shinobigami"))
            .await
            .expect_err("unsupported");
        match err {
            CharacterError::InvalidInput(message) => assert!(message.contains("shinobigami")),
            other => panic!("unexpected error: {other:?}"),
        }

        let stored = character(GameSystem::Cthulhu6);
        let id = stored.id;
        let mut query = CocofoliaExportQuery::new("cthulhu6");
        query.skill_scope = "some".to_string();
        let err = export(stored)
            .cocofolia(&owner(), id, &query)
            .await
            .expect_err("bad scope");
        assert!(matches!(err, CharacterError::InvalidInput(_)));
    }
}
