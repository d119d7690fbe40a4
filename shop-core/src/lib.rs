pub mod repository;
pub mod service;

pub use repository::{
    OrderRepository, ProductRepository, ProductTaxonRepository, RepositoryError, TaxonRepository,
};
pub use service::{ListingConfig, ShopRepositories, ShopService};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
    #[error("Pricing failed: {0}")]
    Pricing(#[from] shop_catalog::PricingError),
    #[error("Product {0} has no variant")]
    NoVariant(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
