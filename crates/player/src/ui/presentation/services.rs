//! Service bundle provided through Dioxus context
//!
//! `main` builds one `Services` from the API adapter; components reach the
//! individual services through the `use_*_service` hooks.

use dioxus::prelude::*;

use crate::application::api::Api;
use crate::application::services::{CharacterService, DiceService};

#[derive(Clone)]
pub struct Services {
    pub character: CharacterService<Api>,
    pub dice: DiceService<Api>,
}

impl Services {
    pub fn new(api: Api) -> Self {
        Self {
            character: CharacterService::new(api.clone()),
            dice: DiceService::new(api),
        }
    }
}

pub fn use_character_service() -> CharacterService<Api> {
    use_context::<Services>().character
}

pub fn use_dice_service() -> DiceService<Api> {
    use_context::<Services>().dice
}
