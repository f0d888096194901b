//! Toast notifications
//!
//! Pages push a success or error message; the shell renders the latest one and
//! clears it after [`TOAST_DURATION_MS`].

use dioxus::prelude::*;

use crate::state::Platform;
use crate::ports::outbound::PlatformPort;

pub const TOAST_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

impl ToastKind {
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast toast-success",
            ToastKind::Error => "toast toast-error",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Copy)]
pub struct ToastState {
    pub current: Signal<Option<Toast>>,
    next_id: Signal<u64>,
}

impl ToastState {
    pub fn new() -> Self {
        Self {
            current: Signal::new(None),
            next_id: Signal::new(0),
        }
    }

    pub fn success(&mut self, platform: &Platform, message: impl Into<String>) {
        self.show(platform, ToastKind::Success, message.into());
    }

    pub fn error(&mut self, platform: &Platform, message: impl Into<String>) {
        self.show(platform, ToastKind::Error, message.into());
    }

    pub fn dismiss(&mut self) {
        self.current.set(None);
    }

    fn show(&mut self, platform: &Platform, kind: ToastKind, message: String) {
        let id = *self.next_id.peek() + 1;
        self.next_id.set(id);
        self.current.set(Some(Toast { id, kind, message }));

        // Only clear the toast this call showed; a newer one keeps its full time.
        let sleep = platform.sleep_ms(TOAST_DURATION_MS);
        let mut current = self.current;
        spawn(async move {
            sleep.await;
            if current.peek().as_ref().map(|t| t.id) == Some(id) {
                current.set(None);
            }
        });
    }
}

impl Default for ToastState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_toast() -> ToastState {
    use_context::<ToastState>()
}
