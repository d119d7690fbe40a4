use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use shop_catalog::{CategoryTaxRateResolver, Channel, Money, Product, ProductTaxon, TaxRate, Taxon};
use shop_order::Order;
use crate::memory::InMemoryCatalog;

#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Cannot read catalog fixture: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Product taxon link references unknown product {0}")]
    UnknownProduct(String),

    #[error("Product taxon link references unknown taxon {0}")]
    UnknownTaxon(String),

    #[error("Order {order} references unknown channel {channel}")]
    UnknownChannel {
        order: String,
        channel: String,
    },

    #[error("Tax rate {0} is negative or not finite")]
    InvalidTaxRate(String),

    #[error("Variant {variant} has a negative price in channel {channel}")]
    InvalidPrice {
        variant: String,
        channel: String,
    },

    #[error("Order {0} has totals out of range")]
    InvalidOrderTotals(String),
}

/// Seed data for the in-memory store
#[derive(Debug, Default, Deserialize)]
pub struct CatalogFixture {
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub taxons: Vec<Taxon>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub product_taxons: Vec<ProductTaxon>,
    #[serde(default)]
    pub tax_rates: Vec<TaxRate>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Store plus the reference data that lives outside the repositories
pub struct LoadedCatalog {
    pub store: Arc<InMemoryCatalog>,
    pub tax_rates: CategoryTaxRateResolver,
    pub channels: Vec<Channel>,
}

impl CatalogFixture {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, FixtureError> {
        let fixture: CatalogFixture = serde_json::from_str(raw)?;
        fixture.validate()?;
        Ok(fixture)
    }

    fn validate(&self) -> Result<(), FixtureError> {
        let products: HashSet<&str> = self.products.iter().map(|p| p.code.as_str()).collect();
        let taxons: HashSet<&str> = self.taxons.iter().map(|t| t.code.as_str()).collect();
        let channels: HashSet<&str> = self.channels.iter().map(|c| c.code.as_str()).collect();

        if let Some(rate) = self.tax_rates.iter().find(|r| !r.is_valid()) {
            return Err(FixtureError::InvalidTaxRate(rate.code.clone()));
        }

        for variant in self.products.iter().flat_map(|p| &p.variants) {
            for pricing in &variant.channel_pricings {
                let negative = pricing.price < Money::ZERO
                    || pricing.original_price.is_some_and(|p| p < Money::ZERO);
                if negative {
                    return Err(FixtureError::InvalidPrice {
                        variant: variant.code.clone(),
                        channel: pricing.channel_code.clone(),
                    });
                }
            }
        }

        for link in &self.product_taxons {
            if !products.contains(link.product_code.as_str()) {
                return Err(FixtureError::UnknownProduct(link.product_code.clone()));
            }
            if !taxons.contains(link.taxon_code.as_str()) {
                return Err(FixtureError::UnknownTaxon(link.taxon_code.clone()));
            }
        }

        for order in &self.orders {
            if !channels.contains(order.channel_code.as_str()) {
                return Err(FixtureError::UnknownChannel {
                    order: order.number.clone(),
                    channel: order.channel_code.clone(),
                });
            }
            if order.totals().is_none() {
                return Err(FixtureError::InvalidOrderTotals(order.number.clone()));
            }
        }

        Ok(())
    }

    pub async fn load(self) -> LoadedCatalog {
        info!(
            products = self.products.len(),
            taxons = self.taxons.len(),
            orders = self.orders.len(),
            "seeding in-memory catalog"
        );

        let store = InMemoryCatalog::new();
        for taxon in self.taxons {
            store.insert_taxon(taxon).await;
        }
        for product in self.products {
            store.insert_product(product).await;
        }
        for link in self.product_taxons {
            store.link(link).await;
        }
        for mut order in self.orders {
            if order.recalculate_totals().is_none() {
                warn!(order = %order.number, "order totals out of range, keeping stored amounts");
            }
            store.insert_order(order).await;
        }

        LoadedCatalog {
            store: Arc::new(store),
            tax_rates: CategoryTaxRateResolver::new(self.tax_rates),
            channels: self.channels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::{ProductVariant, TaxRateResolver};
    use shop_core::repository::{OrderRepository, ProductRepository, TaxonRepository};

    const FIXTURE: &str = r#"{
        "channels": [{ "code": "WEB", "name": "Web store", "base_currency": "EUR" }],
        "taxons": [{ "code": "MUGS", "name": "Mugs" }],
        "products": [{
            "code": "MUG",
            "name": "Mug",
            "variants": [{
                "code": "MUG-RED",
                "tax_category": "standard",
                "channel_pricings": [{ "channel_code": "WEB", "price": 1200, "original_price": 1500 }]
            }]
        }],
        "product_taxons": [{ "product_code": "MUG", "taxon_code": "MUGS" }],
        "tax_rates": [{
            "code": "VAT20",
            "name": "VAT 20%",
            "category": "standard",
            "amount": { "percentage": 0.2 },
            "included_in_price": true
        }],
        "orders": [{
            "number": "000001",
            "channel_code": "WEB",
            "currency": "EUR",
            "state": "NEW",
            "payment_state": "PAID",
            "items": [
                { "variant_code": "MUG-RED", "product_name": "Mug", "quantity": 2, "unit_price": 1200, "tax_total": 400, "tax_included": true },
                { "variant_code": "BOOK-1", "product_name": "Book", "quantity": 1, "unit_price": 1000, "tax_total": 50 }
            ]
        }]
    }"#;

    #[tokio::test]
    async fn test_load_fixture() {
        let loaded = CatalogFixture::from_json(FIXTURE).unwrap().load().await;

        assert_eq!(loaded.channels.len(), 1);
        assert!(TaxonRepository::find_by_code(loaded.store.as_ref(), "MUGS").await.unwrap().is_some());
        assert_eq!(loaded.store.find_all().await.unwrap().len(), 1);

        let order = loaded.store.find_by_number("000001").await.unwrap().unwrap();
        assert_eq!(order.items_total, Money(3400));
        assert_eq!(order.tax_total, Money(450));
        assert_eq!(order.total, Money(3450));

        let product = ProductRepository::find_by_code(loaded.store.as_ref(), "MUG").await.unwrap().unwrap();
        assert!(product.enabled);
        assert_eq!(product.variants[0].channel_pricings[0].original_price, Some(Money(1500)));

        let rate = loaded.tax_rates
            .resolve(&ProductVariant::new("ANY").with_tax_category("standard"))
            .unwrap();
        assert!(rate.included_in_price);
    }

    #[test]
    fn test_rejects_dangling_link() {
        let raw = r#"{
            "taxons": [{ "code": "MUGS", "name": "Mugs" }],
            "product_taxons": [{ "product_code": "GHOST", "taxon_code": "MUGS" }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(raw),
            Err(FixtureError::UnknownProduct(code)) if code == "GHOST"
        ));
    }

    #[test]
    fn test_rejects_order_in_unknown_channel() {
        let raw = r#"{
            "orders": [{
                "number": "000009",
                "channel_code": "POS",
                "currency": "EUR",
                "state": "NEW",
                "payment_state": "AWAITING_PAYMENT"
            }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(raw),
            Err(FixtureError::UnknownChannel { .. })
        ));
    }

    #[test]
    fn test_rejects_negative_tax_rates() {
        let percentage = r#"{
            "tax_rates": [{
                "code": "NEG",
                "name": "Negative",
                "category": "standard",
                "amount": { "percentage": -1.0 },
                "included_in_price": true
            }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(percentage),
            Err(FixtureError::InvalidTaxRate(code)) if code == "NEG"
        ));

        let fixed = r#"{
            "tax_rates": [{
                "code": "ECO",
                "name": "Eco fee",
                "category": "eco",
                "amount": { "fixed": -50 }
            }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(fixed),
            Err(FixtureError::InvalidTaxRate(code)) if code == "ECO"
        ));
    }

    #[test]
    fn test_rejects_negative_price() {
        let raw = r#"{
            "products": [{
                "code": "MUG",
                "name": "Mug",
                "variants": [{
                    "code": "MUG-RED",
                    "channel_pricings": [{ "channel_code": "WEB", "price": 1000, "original_price": -1 }]
                }]
            }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(raw),
            Err(FixtureError::InvalidPrice { variant, channel }) if variant == "MUG-RED" && channel == "WEB"
        ));
    }

    #[test]
    fn test_rejects_order_totals_out_of_range() {
        let raw = r#"{
            "channels": [{ "code": "WEB", "name": "Web store", "base_currency": "EUR" }],
            "orders": [{
                "number": "000010",
                "channel_code": "WEB",
                "currency": "EUR",
                "state": "NEW",
                "payment_state": "PAID",
                "items": [{ "variant_code": "MUG-RED", "product_name": "Mug", "quantity": 3, "unit_price": 4611686018427387904 }]
            }]
        }"#;
        assert!(matches!(
            CatalogFixture::from_json(raw),
            Err(FixtureError::InvalidOrderTotals(number)) if number == "000010"
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(CatalogFixture::from_json("{ not json"), Err(FixtureError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            CatalogFixture::from_path("does/not/exist.json"),
            Err(FixtureError::Io(_))
        ));
    }
}
