pub mod flash;
pub mod identity;
pub mod proxy;
pub mod sessions;
pub mod token;

pub use flash::{Flash, FLASH_COOKIE};
pub use identity::{AuthChange, Subscription, User};
pub use sessions::SessionStore;
