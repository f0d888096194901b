//! Supported TRPG systems.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::sheets::cthulhu::Edition;

/// Game system a character sheet belongs to.
///
/// The wire value is the lowercase identifier (`cthulhu6`, `sw25`, ...). The legacy
/// `cthulhu` value from before the edition split is read as `cthulhu6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSystem {
    #[serde(alias = "cthulhu")]
    Cthulhu6,
    Cthulhu7,
    Shinobigami,
    Sw25,
    Satasupe,
}

impl GameSystem {
    pub const ALL: [GameSystem; 5] = [
        GameSystem::Cthulhu6,
        GameSystem::Cthulhu7,
        GameSystem::Shinobigami,
        GameSystem::Sw25,
        GameSystem::Satasupe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameSystem::Cthulhu6 => "cthulhu6",
            GameSystem::Cthulhu7 => "cthulhu7",
            GameSystem::Shinobigami => "shinobigami",
            GameSystem::Sw25 => "sw25",
            GameSystem::Satasupe => "satasupe",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GameSystem::Cthulhu6 => "クトゥルフ神話TRPG 第6版",
            GameSystem::Cthulhu7 => "クトゥルフ神話TRPG 第7版",
            GameSystem::Shinobigami => "シノビガミ",
            GameSystem::Sw25 => "ソード・ワールド2.5",
            GameSystem::Satasupe => "サタスペ",
        }
    }

    /// Cthulhu edition, if this is one of the Cthulhu systems.
    pub fn cthulhu_edition(&self) -> Option<Edition> {
        match self {
            GameSystem::Cthulhu6 => Some(Edition::Sixth),
            GameSystem::Cthulhu7 => Some(Edition::Seventh),
            _ => None,
        }
    }

    pub fn is_cthulhu(&self) -> bool {
        self.cthulhu_edition().is_some()
    }
}

impl fmt::Display for GameSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameSystem {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cthulhu" | "cthulhu6" => Ok(GameSystem::Cthulhu6),
            "cthulhu7" => Ok(GameSystem::Cthulhu7),
            "shinobigami" => Ok(GameSystem::Shinobigami),
            "sw25" => Ok(GameSystem::Sw25),
            "satasupe" => Ok(GameSystem::Satasupe),
            other => Err(DomainError::parse(format!("Unknown game system: {}", other))),
        }
    }
}
