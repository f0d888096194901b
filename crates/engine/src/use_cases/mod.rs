//! Use cases - user story orchestration over the repository ports.
//!
//! Every operation that touches a character is scoped to the calling user.

pub mod characters;
pub mod dice;
pub mod export;
pub mod images;

pub use characters::{CharacterError, CharacterListing, CharacterUseCases};
pub use dice::DiceUseCases;
pub use export::ExportUseCases;
pub use images::ImageUseCases;
