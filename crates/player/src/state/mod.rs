//! State containers for player-side dependency injection

mod platform;

pub use platform::{Platform, APP_TITLE};
