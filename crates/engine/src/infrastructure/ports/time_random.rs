//! Time and randomness behind ports so use cases stay deterministic under test.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// One face of a `sides`-sided die, in `1..=sides`.
    fn roll_die(&self, sides: u16) -> u16;

    /// Fresh identifier for characters, audit entries and upload keys.
    fn uuid(&self) -> Uuid;
}
