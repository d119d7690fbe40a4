pub mod app_config;
pub mod fixture;
pub mod memory;

pub use fixture::{CatalogFixture, FixtureError, LoadedCatalog};
pub use memory::InMemoryCatalog;
