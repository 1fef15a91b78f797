#[cfg(feature = "desktop")]
pub mod commands;
mod error;
pub mod filter;
pub mod reference;
mod service;
mod store;

pub use error::CatalogError;
pub use filter::{unique_seasons, ShirtFilter};
pub use service::{ImageUpload, ProfileView, ShirtService};
pub use store::{ShirtQuery, ShirtStore};
