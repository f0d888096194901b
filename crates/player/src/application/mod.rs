//! Application layer - use cases and form state, independent of the UI toolkit

pub mod api;
pub mod services;
pub mod sheet_edit;
