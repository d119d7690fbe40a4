use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use crate::money::Money;
use crate::product::{Channel, ChannelPricing, ProductVariant};
use crate::tax::{TaxCalculator, TaxRateResolutionError, TaxRateResolver};

/// Gross and net price of a variant in one channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PricingResult {
    #[serde(rename = "tax")]
    pub price_with_tax: Money,
    #[serde(rename = "noTax")]
    pub price_without_tax: Money,
}

impl PricingResult {
    pub fn tax_amount(&self) -> Money {
        self.price_with_tax - self.price_without_tax
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VariantPricing {
    pub price: PricingResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<PricingResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Variant {variant} has no pricing in channel {channel}")]
    NotFound {
        variant: String,
        channel: String,
    },

    #[error("Tax rate resolution failed: {0}")]
    Resolution(#[from] TaxRateResolutionError),

    #[error("Tax rate {0} is negative or not finite")]
    InvalidTaxRate(String),

    #[error("Price of variant {variant} is out of range")]
    Overflow {
        variant: String,
    },
}

/// Listed prices of a variant per channel
pub trait ChannelPriceLookup: Send + Sync {
    fn current_price(&self, variant: &ProductVariant, channel: &Channel) -> Result<Money, PricingError>;

    fn original_price(&self, variant: &ProductVariant, channel: &Channel) -> Result<Money, PricingError>;
}

/// Reads prices from the variant's own channel pricings
#[derive(Debug, Default, Clone)]
pub struct VariantChannelPrices;

impl VariantChannelPrices {
    fn pricing<'a>(
        variant: &'a ProductVariant,
        channel: &Channel,
    ) -> Result<&'a ChannelPricing, PricingError> {
        variant.channel_pricing_for(channel).ok_or_else(|| PricingError::NotFound {
            variant: variant.code.clone(),
            channel: channel.code.clone(),
        })
    }
}

impl ChannelPriceLookup for VariantChannelPrices {
    fn current_price(&self, variant: &ProductVariant, channel: &Channel) -> Result<Money, PricingError> {
        Ok(Self::pricing(variant, channel)?.price)
    }

    /// A variant that is not discounted has its current price as original price
    fn original_price(&self, variant: &ProductVariant, channel: &Channel) -> Result<Money, PricingError> {
        let pricing = Self::pricing(variant, channel)?;
        Ok(pricing.original_price.unwrap_or(pricing.price))
    }
}

/// Tax-aware price computation for catalog variants
#[derive(Clone)]
pub struct PricingCalculator {
    resolver: Arc<dyn TaxRateResolver>,
    calculator: Arc<dyn TaxCalculator>,
    prices: Arc<dyn ChannelPriceLookup>,
}

impl PricingCalculator {
    pub fn new(
        resolver: Arc<dyn TaxRateResolver>,
        calculator: Arc<dyn TaxCalculator>,
        prices: Arc<dyn ChannelPriceLookup>,
    ) -> Self {
        Self { resolver, calculator, prices }
    }

    /// Current price with and without tax, plus the original price when
    /// `include_original` is set.
    pub fn compute_pricing(
        &self,
        variant: &ProductVariant,
        channel: &Channel,
        include_original: bool,
    ) -> Result<VariantPricing, PricingError> {
        let current = self.prices.current_price(variant, channel)?;
        let price = self.compute_one(current, variant)?;

        let original_price = if include_original {
            let original = self.prices.original_price(variant, channel)?;
            Some(self.compute_one(original, variant)?)
        } else {
            None
        };

        debug!(
            variant = %variant.code,
            channel = %channel.code,
            with_tax = %price.price_with_tax,
            without_tax = %price.price_without_tax,
            tax = %price.tax_amount(),
            "computed variant pricing"
        );

        Ok(VariantPricing { price, original_price })
    }

    /// One side of the pair is always `raw_price`; the other is shifted by the tax amount.
    pub fn compute_one(&self, raw_price: Money, variant: &ProductVariant) -> Result<PricingResult, PricingError> {
        let rate = self.resolver.resolve(variant)?;
        if !rate.is_valid() {
            return Err(PricingError::InvalidTaxRate(rate.code));
        }
        let tax = self.calculator.calculate(raw_price, &rate);
        let overflow = || PricingError::Overflow { variant: variant.code.clone() };

        let result = if rate.included_in_price {
            PricingResult {
                price_with_tax: raw_price,
                price_without_tax: raw_price.checked_sub(tax).ok_or_else(overflow)?,
            }
        } else {
            PricingResult {
                price_with_tax: raw_price.checked_add(tax).ok_or_else(overflow)?,
                price_without_tax: raw_price,
            }
        };

        Ok(result)
    }
}
