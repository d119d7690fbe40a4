use async_trait::async_trait;
use shop_catalog::{Product, Taxon};
use shop_order::Order;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    /// A query expected to yield a single row yielded several
    #[error("Query returned more than one result")]
    NonUniqueResult,

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type RepoResult<T> = Result<T, RepositoryError>;

/// Repository trait for taxonomy access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaxonRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Taxon>>;
}

/// Repository trait for product catalog access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Product>>;

    async fn find_by_code(&self, code: &str) -> RepoResult<Option<Product>>;
}

/// Repository trait for product/taxon membership
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductTaxonRepository: Send + Sync {
    /// Products linked to the taxon in link position order, enabled or not,
    /// at most `limit` links.
    async fn find_products_by_taxon(&self, taxon: &Taxon, limit: usize) -> RepoResult<Vec<Product>>;

    /// Number of enabled products linked to the taxon
    async fn count_enabled_products(&self, taxon: &Taxon) -> RepoResult<u64>;
}

/// Repository trait for order access
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_number(&self, number: &str) -> RepoResult<Option<Order>>;
}
