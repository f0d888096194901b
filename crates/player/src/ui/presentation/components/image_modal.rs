//! Full-size profile image overlay

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ImageModalProps {
    pub image_url: String,
    pub alt: String,
    pub on_close: EventHandler<()>,
}

/// Closes on backdrop click, the close button, or Escape.
#[component]
pub fn ImageModal(props: ImageModalProps) -> Element {
    rsx! {
        div {
            class: "fixed inset-0 bg-black/90 flex items-center justify-center z-[1000]",
            tabindex: "0",
            autofocus: true,
            onclick: move |_| props.on_close.call(()),
            onkeydown: move |e: KeyboardEvent| {
                if e.key() == Key::Escape {
                    props.on_close.call(());
                }
            },

            div {
                class: "relative max-w-[90vw] max-h-[90vh]",
                onclick: move |e| e.stop_propagation(),

                img {
                    src: "{props.image_url}",
                    alt: "{props.alt}",
                    class: "max-w-full max-h-[90vh] object-contain",
                }
                button {
                    r#type: "button",
                    class: "absolute top-[-2.5rem] right-0 btn btn-secondary",
                    onclick: move |_| props.on_close.call(()),
                    "✕ 閉じる"
                }
            }
        }
    }
}
