//! Presentation layer - pages, sheet views, sheet forms and shared components

pub mod components;
pub mod forms;
pub mod pages;
pub mod services;
pub mod state;
pub mod views;

pub use services::Services;
