use dioxus::prelude::*;

pub mod presentation;
pub mod routes;

pub use routes::Route;

use crate::state::Platform;
use presentation::components::ToastHost;
use presentation::state::ToastState;

/// Hook to access the Platform from Dioxus context
pub fn use_platform() -> Platform {
    use_context::<Platform>()
}

pub fn app() -> Element {
    rsx! {
        AppRoot {}
    }
}

#[component]
fn AppRoot() -> Element {
    // Signals need an active Dioxus runtime, so UI state is created here.
    use_context_provider(ToastState::new);

    rsx! {
        document::Stylesheet {
            href: asset!("assets/css/output.css"),
        }

        div {
            class: "min-h-screen bg-dark-bg text-white",
            header {
                class: "border-b border-gray-800 px-6 py-3",
                span { class: "text-lg font-bold", "SheetKeeper" }
            }
            main {
                Router::<Route> {}
            }
            ToastHost {}
        }
    }
}
