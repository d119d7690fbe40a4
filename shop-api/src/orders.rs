use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use shop_order::Order;
use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/orders/{number}", get(get_order))
}

/// GET /v1/orders/:number
pub async fn get_order(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<Order>, AppError> {
    let order = state.shop.order_by_number(&number).await?
        .ok_or_else(|| AppError::NotFoundError(format!("Order {} not found", number)))?;
    Ok(Json(order))
}
