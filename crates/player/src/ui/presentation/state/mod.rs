//! UI state shared through Dioxus context

mod toast_state;

pub use toast_state::{use_toast, Toast, ToastKind, ToastState, TOAST_DURATION_MS};
