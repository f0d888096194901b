//! Exports of character sheets to external table tools.

pub mod cocofolia;

pub use cocofolia::{
    CocofoliaCharacter, CocofoliaClipboard, CocofoliaExporter, CocofoliaParam, CocofoliaStatus,
    CthulhuExporter, DiceStyle, ExportInput, ExportOptions, ExporterRegistry, SkillScope,
};
