//! Reusable components shared by pages, views and forms

pub mod auto_roll;
pub mod basic_info_form;
pub mod cocofolia_export;
pub mod common;
pub mod dice_roller;
pub mod image_modal;
pub mod tabs;

pub use auto_roll::AutoRollAttributes;
pub use basic_info_form::BasicInfoForm;
pub use cocofolia_export::CocofoliaExportModal;
pub use common::{
    copy_to_clipboard, ConfirmDialog, ErrorBanner, LoadingSpinner, SectionTitle, TagList, ToastHost,
};
pub use dice_roller::DiceRoller;
pub use image_modal::ImageModal;
pub use tabs::TabBar;
