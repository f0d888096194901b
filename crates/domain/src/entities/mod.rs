//! Domain entities - Core business objects with identity

mod audit;
mod character;

pub use audit::{AuditAction, AuditLogEntry};
pub use character::{Character, CharacterUpdate};
