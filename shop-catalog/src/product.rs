use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::money::Money;

/// Sales context with its own prices (storefront, region, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Channel {
    pub code: String,
    pub name: String,
    pub base_currency: String,
}

impl Channel {
    pub fn new(code: impl Into<String>, base_currency: impl Into<String>) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            base_currency: base_currency.into(),
        }
    }
}

/// Node of the catalog taxonomy
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Taxon {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub parent_code: Option<String>,
    #[serde(default)]
    pub position: i32,
}

impl Taxon {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            parent_code: None,
            position: 0,
        }
    }
}

/// Price of a variant in one channel
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChannelPricing {
    pub channel_code: String,
    pub price: Money,
    /// Pre-discount price, if the variant is on sale
    #[serde(default)]
    pub original_price: Option<Money>,
}

/// Purchasable configuration of a product (size, color, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductVariant {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: i32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub tax_category: Option<String>,
    #[serde(default)]
    pub channel_pricings: Vec<ChannelPricing>,
}

impl ProductVariant {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: None,
            position: 0,
            enabled: true,
            tax_category: None,
            channel_pricings: Vec::new(),
        }
    }

    pub fn with_tax_category(mut self, category: impl Into<String>) -> Self {
        self.tax_category = Some(category.into());
        self
    }

    pub fn with_pricing(mut self, pricing: ChannelPricing) -> Self {
        self.channel_pricings.push(pricing);
        self
    }

    pub fn channel_pricing_for(&self, channel: &Channel) -> Option<&ChannelPricing> {
        self.channel_pricings
            .iter()
            .find(|p| p.channel_code == channel.code)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Product {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: code.into(),
            name: name.into(),
            description: None,
            enabled: true,
            variants: Vec::new(),
        }
    }

    pub fn with_variant(mut self, variant: ProductVariant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Membership of a product in a taxon
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductTaxon {
    pub product_code: String,
    pub taxon_code: String,
    #[serde(default)]
    pub position: i32,
}

fn default_enabled() -> bool { true }

/// Picks the variant shown for a product when none was chosen explicitly
pub trait ProductVariantResolver: Send + Sync {
    fn resolve<'a>(&self, product: &'a Product) -> Option<&'a ProductVariant>;
}

/// First enabled variant by position. A product whose variants are all disabled has none.
#[derive(Debug, Default, Clone)]
pub struct DefaultVariantResolver;

impl ProductVariantResolver for DefaultVariantResolver {
    fn resolve<'a>(&self, product: &'a Product) -> Option<&'a ProductVariant> {
        product.variants
            .iter()
            .filter(|v| v.enabled)
            .min_by_key(|v| v.position)
    }
}
