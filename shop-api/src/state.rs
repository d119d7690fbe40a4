use std::collections::HashMap;
use std::sync::Arc;
use shop_catalog::{Channel, DefaultTaxCalculator, DefaultVariantResolver, PricingCalculator, VariantChannelPrices};
use shop_core::{ListingConfig, ShopRepositories, ShopService};
use shop_store::LoadedCatalog;
use crate::error::AppError;

#[derive(Clone)]
pub struct AppState {
    pub shop: Arc<ShopService>,
    pub channels: Arc<HashMap<String, Channel>>,
    pub default_channel: String,
}

impl AppState {
    /// Wires the shop service over a seeded in-memory catalog
    pub fn from_catalog(loaded: LoadedCatalog, listing: ListingConfig, default_channel: impl Into<String>) -> Self {
        let pricing = PricingCalculator::new(
            Arc::new(loaded.tax_rates),
            Arc::new(DefaultTaxCalculator),
            Arc::new(VariantChannelPrices),
        );

        let repos = ShopRepositories {
            taxons: loaded.store.clone(),
            products: loaded.store.clone(),
            product_taxons: loaded.store.clone(),
            orders: loaded.store,
        };

        let shop = ShopService::new(repos, pricing, Arc::new(DefaultVariantResolver), listing);

        let channels = loaded.channels
            .into_iter()
            .map(|c| (c.code.clone(), c))
            .collect();

        Self {
            shop: Arc::new(shop),
            channels: Arc::new(channels),
            default_channel: default_channel.into(),
        }
    }

    /// Requested channel, or the default one
    pub fn channel(&self, code: Option<&str>) -> Result<&Channel, AppError> {
        let code = code.unwrap_or(&self.default_channel);
        self.channels
            .get(code)
            .ok_or_else(|| AppError::NotFoundError(format!("Channel {} not found", code)))
    }
}
