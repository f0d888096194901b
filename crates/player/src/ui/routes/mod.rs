//! Routes and their handlers
//!
//! Each handler sets the page title and hands off to a page in `presentation`.

use dioxus::prelude::*;
use uuid::Uuid;

use crate::ports::outbound::PlatformPort;
use crate::ui::use_platform;
use crate::ui::presentation::pages::{CreatePage, DashboardPage, DetailPage, EditPage, SharedPage};

#[derive(Clone, Debug, PartialEq, Routable)]
#[rustfmt::skip]
pub enum Route {
    #[route("/")]
    DashboardRoute {},
    #[route("/characters/new")]
    CreateRoute {},
    #[route("/characters/:id")]
    DetailRoute { id: Uuid },
    #[route("/characters/:id/edit")]
    EditRoute { id: Uuid },
    #[route("/share/:token")]
    SharedRoute { token: String },
}

/// Character list
#[component]
pub fn DashboardRoute() -> Element {
    let platform = use_platform();
    use_effect(move || platform.set_page_title("キャラクター一覧"));
    rsx! { DashboardPage {} }
}

#[component]
pub fn CreateRoute() -> Element {
    let platform = use_platform();
    use_effect(move || platform.set_page_title("キャラクター作成"));
    rsx! { CreatePage {} }
}

/// Detail page; its title becomes the character name once loaded.
#[component]
pub fn DetailRoute(id: Uuid) -> Element {
    rsx! { DetailPage { id } }
}

#[component]
pub fn EditRoute(id: Uuid) -> Element {
    rsx! { EditPage { id } }
}

#[component]
pub fn SharedRoute(token: String) -> Element {
    rsx! { SharedPage { token } }
}
