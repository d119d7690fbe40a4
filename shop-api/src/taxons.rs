use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use shop_catalog::{Product, Taxon};
use crate::error::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductCountResponse {
    pub code: String,
    pub count: u64,
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/taxons/{code}", get(get_taxon))
        .route("/v1/taxons/{code}/products", get(list_taxon_products))
        .route("/v1/taxons/{code}/product-count", get(count_taxon_products))
}

/// GET /v1/taxons/:code
pub async fn get_taxon(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Taxon>, AppError> {
    let taxon = state.shop.taxon_by_code(&code).await?
        .ok_or_else(|| AppError::NotFoundError(format!("Taxon {} not found", code)))?;
    Ok(Json(taxon))
}

/// GET /v1/taxons/:code/products
/// Unknown taxons list no products
pub async fn list_taxon_products(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<Vec<Product>>, AppError> {
    let taxon = state.shop.taxon_by_code(&code).await?;
    let products = state.shop.taxon_products(taxon.as_ref()).await?;
    Ok(Json(products))
}

/// GET /v1/taxons/:code/product-count
pub async fn count_taxon_products(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<ProductCountResponse>, AppError> {
    let taxon = state.shop.taxon_by_code(&code).await?
        .ok_or_else(|| AppError::NotFoundError(format!("Taxon {} not found", code)))?;
    let count = state.shop.enabled_product_count(&taxon).await?;
    Ok(Json(ProductCountResponse { code: taxon.code, count }))
}
