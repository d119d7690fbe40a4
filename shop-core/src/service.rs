use std::sync::Arc;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;
use tracing::{debug, warn};
use shop_catalog::{
    Channel, PricingCalculator, Product, ProductVariant, ProductVariantResolver, Taxon, VariantPricing,
};
use shop_order::Order;
use crate::repository::{
    OrderRepository, ProductRepository, ProductTaxonRepository, RepositoryError, TaxonRepository,
};
use crate::{CoreError, CoreResult};

/// Sizes of the storefront listings
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Links fetched for a taxon listing, before disabled products are dropped
    #[serde(default = "default_listing_limit")]
    pub listing_limit: usize,
    #[serde(default = "default_random_sample_size")]
    pub random_sample_size: usize,
    /// Upper bound on products drawn while building a random sample
    #[serde(default = "default_random_max_draws")]
    pub random_max_draws: usize,
}

fn default_listing_limit() -> usize { 15 }
fn default_random_sample_size() -> usize { 15 }
fn default_random_max_draws() -> usize { 50 }

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            listing_limit: default_listing_limit(),
            random_sample_size: default_random_sample_size(),
            random_max_draws: default_random_max_draws(),
        }
    }
}

#[derive(Clone)]
pub struct ShopRepositories {
    pub taxons: Arc<dyn TaxonRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub product_taxons: Arc<dyn ProductTaxonRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

/// Read-side queries of the storefront
#[derive(Clone)]
pub struct ShopService {
    repos: ShopRepositories,
    pricing: PricingCalculator,
    variant_resolver: Arc<dyn ProductVariantResolver>,
    config: ListingConfig,
}

impl ShopService {
    pub fn new(
        repos: ShopRepositories,
        pricing: PricingCalculator,
        variant_resolver: Arc<dyn ProductVariantResolver>,
        config: ListingConfig,
    ) -> Self {
        Self { repos, pricing, variant_resolver, config }
    }

    pub async fn taxon_by_code(&self, code: &str) -> CoreResult<Option<Taxon>> {
        debug!(code, "looking up taxon");
        Ok(self.repos.taxons.find_by_code(code).await?)
    }

    /// Enabled products in the taxon. An ambiguous count query reads as zero.
    pub async fn enabled_product_count(&self, taxon: &Taxon) -> CoreResult<u64> {
        match self.repos.product_taxons.count_enabled_products(taxon).await {
            Ok(count) => Ok(count),
            Err(RepositoryError::NonUniqueResult) => {
                warn!(taxon = %taxon.code, "product count query was not unique, reporting none");
                Ok(0)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Horizontal product listing for a taxon. The link limit is applied
    /// before disabled products are dropped, so the list may be shorter.
    pub async fn taxon_products(&self, taxon: Option<&Taxon>) -> CoreResult<Vec<Product>> {
        let Some(taxon) = taxon else {
            return Ok(Vec::new());
        };

        let products = self.repos.product_taxons
            .find_products_by_taxon(taxon, self.config.listing_limit)
            .await?;

        Ok(products.into_iter().filter(|p| p.enabled).collect())
    }

    pub async fn product_by_code(&self, code: &str) -> CoreResult<Option<Product>> {
        Ok(self.repos.products.find_by_code(code).await?)
    }

    pub async fn random_products(&self) -> CoreResult<Vec<Product>> {
        let products = self.repos.products.find_all().await?;
        Ok(self.sample(products, &mut rand::thread_rng()))
    }

    pub async fn random_products_with<R: Rng + ?Sized>(&self, rng: &mut R) -> CoreResult<Vec<Product>> {
        let products = self.repos.products.find_all().await?;
        Ok(self.sample(products, rng))
    }

    /// Draws without replacement, keeping enabled products
    fn sample<R: Rng + ?Sized>(&self, mut products: Vec<Product>, rng: &mut R) -> Vec<Product> {
        products.shuffle(rng);
        products
            .into_iter()
            .take(self.config.random_max_draws)
            .filter(|p| p.enabled)
            .take(self.config.random_sample_size)
            .collect()
    }

    pub async fn order_by_number(&self, number: &str) -> CoreResult<Option<Order>> {
        debug!(number, "looking up order");
        Ok(self.repos.orders.find_by_number(number).await?)
    }

    /// Current pricing of the product's default variant
    pub fn product_pricing(&self, product: &Product, channel: &Channel) -> CoreResult<VariantPricing> {
        self.product_pricing_with_original(product, channel, false)
    }

    /// Default-variant pricing, with the original price when asked for
    pub fn product_pricing_with_original(
        &self,
        product: &Product,
        channel: &Channel,
        include_original: bool,
    ) -> CoreResult<VariantPricing> {
        let variant = self.variant_resolver
            .resolve(product)
            .ok_or_else(|| CoreError::NoVariant(product.code.clone()))?;

        self.variant_pricing(variant, channel, include_original)
    }

    pub fn variant_pricing(
        &self,
        variant: &ProductVariant,
        channel: &Channel,
        include_original: bool,
    ) -> CoreResult<VariantPricing> {
        Ok(self.pricing.compute_pricing(variant, channel, include_original)?)
    }
}
