//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Clock/Random (for testing)

mod error;
mod repos;
mod time_random;
pub mod types;

pub use error::RepoError;
pub use repos::{AuditLogRepo, CharacterRepo};
pub use time_random::{ClockPort, RandomPort};
pub use types::{CharacterFilter, CharacterPage};

#[cfg(test)]
pub use repos::{MockAuditLogRepo, MockCharacterRepo};
#[cfg(test)]
pub use time_random::{MockClockPort, MockRandomPort};
