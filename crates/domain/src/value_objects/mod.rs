//! Value objects - Immutable objects defined by their attributes

mod dice;
mod names;
mod tags;

pub use dice::{
    DiceFormula, DiceParseError, DiceRollResult, MAX_DICE_COUNT, MAX_DIE_SIZE,
    SHORTHAND_DIE_SIZE,
};
pub use names::{CharacterName, MAX_NAME_LENGTH};
pub use tags::Tags;
