pub mod money;
pub mod product;
pub mod tax;
pub mod pricing;

pub use money::Money;
pub use product::{
    Channel, ChannelPricing, DefaultVariantResolver, Product, ProductTaxon, ProductVariant,
    ProductVariantResolver, Taxon,
};
pub use tax::{
    CategoryTaxRateResolver, DefaultTaxCalculator, TaxCalculator, TaxRate, TaxRateAmount,
    TaxRateResolutionError, TaxRateResolver,
};
pub use pricing::{
    ChannelPriceLookup, PricingCalculator, PricingError, PricingResult, VariantChannelPrices,
    VariantPricing,
};
