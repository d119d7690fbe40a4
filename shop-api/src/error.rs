use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use shop_catalog::PricingError;
use shop_core::CoreError;

#[derive(Debug)]
pub enum AppError {
    NotFoundError(String),
    UnprocessableError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::UnprocessableError(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoVariant(_) | CoreError::Pricing(PricingError::NotFound { .. }) => {
                AppError::NotFoundError(err.to_string())
            }
            // Tax configuration or listed price unusable for an existing product
            CoreError::Pricing(
                PricingError::Resolution(_) | PricingError::InvalidTaxRate(_) | PricingError::Overflow { .. },
            ) => AppError::UnprocessableError(err.to_string()),
            CoreError::Repository(_) => AppError::InternalServerError(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shop_catalog::TaxRateResolutionError;
    use shop_core::RepositoryError;

    #[test]
    fn test_core_error_mapping() {
        let not_found: AppError = CoreError::Pricing(PricingError::NotFound {
            variant: "MUG-RED".to_string(),
            channel: "POS".to_string(),
        }).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let unresolved: AppError = CoreError::Pricing(PricingError::Resolution(
            TaxRateResolutionError::MissingTaxCategory("MUG-RED".to_string()),
        )).into();
        assert_eq!(unresolved.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let overflow: AppError = CoreError::Pricing(PricingError::Overflow {
            variant: "MUG-RED".to_string(),
        }).into();
        assert_eq!(overflow.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let invalid_rate: AppError = CoreError::Pricing(PricingError::InvalidTaxRate("NEG".to_string())).into();
        assert_eq!(invalid_rate.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);

        let backend: AppError = CoreError::Repository(RepositoryError::Backend("down".to_string())).into();
        assert_eq!(backend.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
