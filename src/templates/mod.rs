pub mod components;
pub mod layouts;
pub mod pages;

// Re-exports for convenience
pub use components::{filter_form, hackathon_card, user_menu};
pub use layouts::desktop::desktop_layout;
