pub mod form;
pub mod query;
pub mod state;

pub use form::{FilterFormController, RequestAddressBar};
pub use state::{DateRange, FilterState, Location, Platform};
