use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::money::Money;
use crate::product::ProductVariant;

/// How a tax rate is expressed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TaxRateAmount {
    /// Fraction of the price, `0.2` is 20%
    Percentage(f64),
    /// Flat amount per unit
    Fixed(Money),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxRate {
    pub code: String,
    pub name: String,
    /// Tax category code the rate applies to
    pub category: String,
    pub amount: TaxRateAmount,
    /// Listed prices already contain the tax
    #[serde(default)]
    pub included_in_price: bool,
}

impl TaxRate {
    pub fn percentage(code: impl Into<String>, category: impl Into<String>, rate: f64, included_in_price: bool) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            category: category.into(),
            amount: TaxRateAmount::Percentage(rate),
            included_in_price,
        }
    }

    pub fn fixed(code: impl Into<String>, category: impl Into<String>, amount: Money, included_in_price: bool) -> Self {
        let code = code.into();
        Self {
            name: code.clone(),
            code,
            category: category.into(),
            amount: TaxRateAmount::Fixed(amount),
            included_in_price,
        }
    }

    /// Percentages must be finite and non-negative, fixed amounts non-negative
    pub fn is_valid(&self) -> bool {
        match self.amount {
            TaxRateAmount::Percentage(fraction) => fraction.is_finite() && fraction >= 0.0,
            TaxRateAmount::Fixed(amount) => amount >= Money::ZERO,
        }
    }
}

/// Computes the tax part of a price
pub trait TaxCalculator: Send + Sync {
    fn calculate(&self, base: Money, rate: &TaxRate) -> Money;
}

/// Percentage taxes are rounded half away from zero to the minor unit.
/// For prices that include tax the amount is extracted from the gross price.
#[derive(Debug, Default, Clone)]
pub struct DefaultTaxCalculator;

impl TaxCalculator for DefaultTaxCalculator {
    fn calculate(&self, base: Money, rate: &TaxRate) -> Money {
        match rate.amount {
            TaxRateAmount::Percentage(fraction) => {
                let base = base.minor_units() as f64;
                let tax = if rate.included_in_price {
                    base - base / (1.0 + fraction)
                } else {
                    base * fraction
                };
                Money(tax.round() as i64)
            }
            TaxRateAmount::Fixed(amount) => {
                if rate.included_in_price {
                    amount.min(base)
                } else {
                    amount
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaxRateResolutionError {
    #[error("Variant {0} has no tax category")]
    MissingTaxCategory(String),

    #[error("No tax rate for category {category} (variant {variant})")]
    NoMatchingRate {
        variant: String,
        category: String,
    },
}

/// Finds the tax rate that applies to a variant
pub trait TaxRateResolver: Send + Sync {
    fn resolve(&self, variant: &ProductVariant) -> Result<TaxRate, TaxRateResolutionError>;
}

/// Resolves by the variant's tax category. One rate per category; later
/// registrations replace earlier ones.
#[derive(Debug, Default, Clone)]
pub struct CategoryTaxRateResolver {
    rates: HashMap<String, TaxRate>,
}

impl CategoryTaxRateResolver {
    pub fn new(rates: impl IntoIterator<Item = TaxRate>) -> Self {
        let mut resolver = Self::default();
        for rate in rates {
            resolver.register(rate);
        }
        resolver
    }

    pub fn register(&mut self, rate: TaxRate) {
        self.rates.insert(rate.category.clone(), rate);
    }
}

impl TaxRateResolver for CategoryTaxRateResolver {
    fn resolve(&self, variant: &ProductVariant) -> Result<TaxRate, TaxRateResolutionError> {
        let category = variant.tax_category.as_ref()
            .ok_or_else(|| TaxRateResolutionError::MissingTaxCategory(variant.code.clone()))?;

        self.rates.get(category)
            .cloned()
            .ok_or_else(|| TaxRateResolutionError::NoMatchingRate {
                variant: variant.code.clone(),
                category: category.clone(),
            })
    }
}
