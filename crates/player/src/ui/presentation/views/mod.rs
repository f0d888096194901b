//! Read-only sheet views for the detail and shared pages.

mod cthulhu;
mod generic;
mod shinobigami;
mod sw25;

pub use cthulhu::{attribute_label, CthulhuSheetView};
pub use generic::GenericSheetView;
pub use shinobigami::ShinobigamiSheetView;
pub use sw25::{attribute_bonus, Sw25SheetView};

use dioxus::prelude::*;
use serde_json::Value;
use sheetkeeper_domain::sheets::{self, SheetData};
use sheetkeeper_domain::GameSystem;

/// Normalizes the stored sheet and renders the layout for its system.
#[component]
pub fn SheetView(system: GameSystem, sheet_data: Value) -> Element {
    match sheets::normalize(system, &sheet_data) {
        SheetData::Cthulhu { edition, sheet } => rsx! {
            CthulhuSheetView { sheet: *sheet, edition }
        },
        SheetData::Shinobigami(sheet) => rsx! {
            ShinobigamiSheetView { sheet }
        },
        SheetData::Sw25(sheet) => rsx! {
            Sw25SheetView { sheet: *sheet }
        },
        SheetData::Generic(data) => rsx! {
            GenericSheetView { data }
        },
    }
}
