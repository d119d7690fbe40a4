use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use shop_catalog::{Product, VariantPricing};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PricingQuery {
    pub channel: Option<String>,
    #[serde(default)]
    pub original: bool,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/products/random", get(random_products))
        .route("/v1/products/{code}/pricing", get(product_pricing))
}

/// GET /v1/products/random
pub async fn random_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, AppError> {
    Ok(Json(state.shop.random_products().await?))
}

/// GET /v1/products/:code/pricing?channel=WEB&original=true
/// Pricing of the product's default variant
pub async fn product_pricing(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Query(query): Query<PricingQuery>,
) -> Result<Json<VariantPricing>, AppError> {
    let channel = state.channel(query.channel.as_deref())?;
    let product = state.shop.product_by_code(&code).await?
        .ok_or_else(|| AppError::NotFoundError(format!("Product {} not found", code)))?;

    let pricing = if query.original {
        state.shop.product_pricing_with_original(&product, channel, true)?
    } else {
        state.shop.product_pricing(&product, channel)?
    };
    Ok(Json(pricing))
}
