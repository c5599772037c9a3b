pub mod card;
pub mod error;
pub mod filter_form;
pub mod user_menu;

pub use card::hackathon_card;
pub use error::error_page;
pub use filter_form::filter_form;
pub use user_menu::user_menu;
