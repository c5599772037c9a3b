pub mod errors;
pub mod html;
pub mod json;
pub mod redirect;

pub use crate::errors::ResultResp;
pub use errors::error_to_response;
pub use html::html_response;
pub use json::{json_response, text_response};
pub use redirect::{see_other, see_other_with_cookies};
