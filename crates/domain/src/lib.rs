//! Character sheets for tabletop RPGs: per-system sheet models, normalization and
//! derived-stat rules, dice, and exports.
//!
//! Everything here is pure. Randomness comes in as a die-rolling closure and time as
//! explicit timestamps, so the engine and the player share the same rules.

pub mod entities;
pub mod error;
pub mod export;
pub mod game_system;
pub mod ids;
pub mod sheets;
pub mod value_objects;

pub use entities::{AuditAction, AuditLogEntry, Character, CharacterUpdate};
pub use error::DomainError;
pub use export::{
    CocofoliaClipboard, CocofoliaExporter, DiceStyle, ExportInput, ExportOptions,
    ExporterRegistry, SkillScope,
};
pub use game_system::GameSystem;
pub use ids::{AuditLogId, CharacterId, UserId};
pub use sheets::SheetData;
pub use value_objects::{
    CharacterName, DiceFormula, DiceParseError, DiceRollResult, Tags, MAX_NAME_LENGTH,
};
