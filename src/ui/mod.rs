pub mod app_layout;
pub mod help_popup;
pub mod inspector;
pub mod sidebar;
pub mod status_bar;
pub mod styles;

pub use app_layout::render;
