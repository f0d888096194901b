//! Free-form dice rolls and characteristic auto-roll.

use std::sync::{Arc, LazyLock};

use regex_lite::Regex;
use sheetkeeper_domain::sheets::cthulhu::{compute_derived, roll_attributes};
use sheetkeeper_domain::{
    CharacterId, DiceFormula, DiceParseError, DiceRollResult, GameSystem, UserId,
};
use sheetkeeper_domain::value_objects::{MAX_DICE_COUNT, MAX_DIE_SIZE};
use sheetkeeper_shared::AutoRollResponse;

use crate::infrastructure::ports::{CharacterRepo, RandomPort};
use crate::use_cases::characters::{load_owned, CharacterError};

static FORMULA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)d(\d+)$").expect("valid regex"));

pub struct DiceUseCases {
    characters: Arc<dyn CharacterRepo>,
    random: Arc<dyn RandomPort>,
}

impl DiceUseCases {
    pub fn new(characters: Arc<dyn CharacterRepo>, random: Arc<dyn RandomPort>) -> Self {
        Self { characters, random }
    }

    /// Parses a plain `XdY` formula, case-insensitively. Modifiers and surrounding
    /// whitespace are rejected.
    pub fn parse_formula(&self, formula: &str) -> Result<DiceFormula, CharacterError> {
        let normalized = formula.to_lowercase();
        let captures = FORMULA_RE.captures(&normalized).ok_or_else(|| {
            CharacterError::invalid_input(format!(
                "無効なダイス式です: {formula}. 形式は 'XdY' (例: 3d6) です。"
            ))
        })?;

        let count = captures[1].parse::<u16>().map_err(|_| {
            DiceParseError::InvalidDiceCount {
                count: captures[1].parse::<u32>().unwrap_or(u32::MAX),
                max: MAX_DICE_COUNT,
            }
        });
        let sides = captures[2].parse::<u16>().map_err(|_| {
            DiceParseError::InvalidDieSize {
                size: captures[2].parse::<u32>().unwrap_or(u32::MAX),
                max: MAX_DIE_SIZE,
            }
        });

        count
            .and_then(|count| sides.and_then(|sides| DiceFormula::new(count, sides, 0)))
            .map_err(|e| CharacterError::invalid_input(e.to_string()))
    }

    pub fn roll(&self, formula: &str) -> Result<DiceRollResult, CharacterError> {
        let formula = self.parse_formula(formula)?;
        let result = formula.roll_with(|sides| self.random.roll_die(sides));
        tracing::debug!(formula = %formula, total = result.total, "Dice rolled");
        Ok(result)
    }

    /// Rolls fresh characteristics for an owned Cthulhu character without saving them.
    pub async fn auto_roll(
        &self,
        user_id: &UserId,
        id: CharacterId,
        system: GameSystem,
    ) -> Result<AutoRollResponse, CharacterError> {
        let character = load_owned(self.characters.as_ref(), user_id, id).await?;

        let edition = system.cthulhu_edition().ok_or_else(|| {
            CharacterError::invalid_input(format!(
                "能力値自動生成は現在 {}/{} のみ対応しています",
                GameSystem::Cthulhu6,
                GameSystem::Cthulhu7
            ))
        })?;
        if character.system != system {
            return Err(CharacterError::system_mismatch(character.system, system));
        }

        let attributes = roll_attributes(edition, |sides| self.random.roll_die(sides));
        let derived = compute_derived(edition, &attributes);
        Ok(AutoRollResponse {
            attributes,
            derived,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sheetkeeper_domain::{Character, CharacterName};

    use crate::infrastructure::clock::FixedRandom;
    use crate::infrastructure::ports::MockCharacterRepo;

    fn dice(characters: MockCharacterRepo, face: u16) -> DiceUseCases {
        DiceUseCases::new(Arc::new(characters), Arc::new(FixedRandom(face)))
    }

    fn owned(system: GameSystem) -> Character {
        Character::new(
            CharacterId::new(),
            UserId::new("owner").expect("user"),
            system,
            CharacterName::new("x").expect("name"),
            Utc::now(),
        )
    }

    fn repo_with(character: Character) -> MockCharacterRepo {
        let mut repo = MockCharacterRepo::new();
        repo.expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        repo
    }

    fn message(err: CharacterError) -> String {
        match err {
            CharacterError::InvalidInput(message) => message,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn roll_sums_each_die() {
        let result = dice(MockCharacterRepo::new(), 4)
            .roll("3D6")
            .expect("roll");
        assert_eq!(result.individual_rolls, vec![4, 4, 4]);
        assert_eq!(result.total, 12);
    }

    #[test]
    fn roll_rejects_malformed_and_out_of_range_formulas() {
        let uc = dice(MockCharacterRepo::new(), 1);

        let err = uc.roll("2d6+1").expect_err("modifier");
        assert_eq!(
            message(err),
            "無効なダイス式です: 2d6+1. 形式は 'XdY' (例: 3d6) です。"
        );
        let err = uc.roll(" 3d6 ").expect_err("padded");
        assert_eq!(
            message(err),
            "無効なダイス式です:  3d6 . 形式は 'XdY' (例: 3d6) です。"
        );
        let err = uc.roll("0d6").expect_err("zero dice");
        assert_eq!(
            message(err),
            "ダイスの個数は1から1000の範囲で指定してください。現在の値: 0"
        );
        let err = uc.roll("1d1").expect_err("one side");
        assert_eq!(
            message(err),
            "ダイスの面数は2から1000の範囲で指定してください。現在の値: 1"
        );
        let err = uc.roll("70000d6").expect_err("huge count");
        assert_eq!(
            message(err),
            "ダイスの個数は1から1000の範囲で指定してください。現在の値: 70000"
        );
        uc.roll("1000d1000").expect("upper bounds");
    }

    #[tokio::test]
    async fn auto_roll_seventh_edition_scales_by_five() {
        let character = owned(GameSystem::Cthulhu7);
        let id = character.id;
        let rolled = dice(repo_with(character), 3)
            .auto_roll(&UserId::new("owner").expect("user"), id, GameSystem::Cthulhu7)
            .await
            .expect("auto roll");

        assert_eq!(rolled.attributes.str, 45);
        assert_eq!(rolled.attributes.siz, 60);
        assert_eq!(rolled.attributes.edu, 60);
        assert_eq!(rolled.attributes.luk, Some(45));
    }

    #[tokio::test]
    async fn auto_roll_rejects_other_systems_and_mismatches() {
        let owner = UserId::new("owner").expect("user");

        let character = owned(GameSystem::Shinobigami);
        let id = character.id;
        let err = dice(repo_with(character), 3)
            .auto_roll(&owner, id, GameSystem::Shinobigami)
            .await
            .expect_err("unsupported");
        assert_eq!(
            message(err),
            "能力値自動生成は現在 cthulhu6/cthulhu7 のみ対応しています"
        );

        let character = owned(GameSystem::Cthulhu6);
        let id = character.id;
        let err = dice(repo_with(character), 3)
            .auto_roll(&owner, id, GameSystem::Cthulhu7)
            .await
            .expect_err("mismatch");
        assert_eq!(
            message(err),
            "キャラクターのシステム (cthulhu6) とリクエストのシステム (cthulhu7) が一致しません"
        );
    }

    #[tokio::test]
    async fn auto_roll_requires_ownership() {
        let character = owned(GameSystem::Cthulhu6);
        let id = character.id;
        let err = dice(repo_with(character), 3)
            .auto_roll(&UserId::new("other").expect("user"), id, GameSystem::Cthulhu6)
            .await
            .expect_err("forbidden");
        assert!(matches!(err, CharacterError::Forbidden));
    }
}
