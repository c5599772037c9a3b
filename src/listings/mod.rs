pub mod client;
pub mod controller;
pub mod engine;
pub mod model;

pub use client::{BackendClient, FetchError, ListingSource};
pub use controller::{ListingController, ListingView};
pub use model::Listing;
