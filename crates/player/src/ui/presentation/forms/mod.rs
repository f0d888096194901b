//! Sheet forms, one per system, behind a single dispatcher.

mod cthulhu;
mod fields;
mod generic;
mod shinobigami;
mod sw25;

pub use cthulhu::CthulhuForm;
pub use generic::GenericForm;
pub use shinobigami::ShinobigamiForm;
pub use sw25::Sw25Form;

use dioxus::prelude::*;
use sheetkeeper_domain::GameSystem;
use uuid::Uuid;

use crate::application::sheet_edit::{
    cthulhu as cthulhu_edit, shinobigami as shinobigami_edit, sw25 as sw25_edit, SheetDraft,
};

/// Renders the form for the draft and applies every edit to it.
#[component]
pub fn SheetForm(
    mut draft: Signal<SheetDraft>,
    system: GameSystem,
    #[props(default)] character_id: Option<Uuid>,
) -> Element {
    let mut refused: Signal<Option<String>> = use_signal(|| None);
    let current = draft.read().clone();

    match current {
        SheetDraft::Cthulhu { edition, sheet } => rsx! {
            CthulhuForm {
                sheet: *sheet,
                edition,
                system,
                character_id,
                on_edit: move |edit| {
                    if let SheetDraft::Cthulhu { edition, sheet } = &mut *draft.write() {
                        cthulhu_edit::apply(sheet, *edition, edit);
                    }
                },
            }
        },
        SheetDraft::Shinobigami(sheet) => rsx! {
            ShinobigamiForm {
                sheet,
                error: refused.read().clone(),
                on_edit: move |edit| {
                    if let SheetDraft::Shinobigami(sheet) = &mut *draft.write() {
                        refused.set(shinobigami_edit::apply(sheet, edit).err());
                    }
                },
            }
        },
        SheetDraft::Sw25(sheet) => rsx! {
            Sw25Form {
                sheet: *sheet,
                on_edit: move |edit| {
                    if let SheetDraft::Sw25(sheet) = &mut *draft.write() {
                        sw25_edit::apply(sheet, edit);
                    }
                },
            }
        },
        SheetDraft::Generic { text } => rsx! {
            GenericForm {
                text,
                on_input: move |next| draft.set(SheetDraft::Generic { text: next }),
            }
        },
    }
}
