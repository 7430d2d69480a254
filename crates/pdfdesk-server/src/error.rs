//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pdfdesk_common::CatalogError;
use thiserror::Error;

use crate::api::response::ErrorResponse;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// HTTP status for a catalog failure
pub fn catalog_status(err: &CatalogError) -> StatusCode {
    match err {
        CatalogError::InvalidName(_)
        | CatalogError::InvalidDocument(_)
        | CatalogError::InvalidSelection { .. } => StatusCode::BAD_REQUEST,
        CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::MalformedRecord(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CatalogError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        CatalogError::Encoding(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Catalog(err) => catalog_status(err),
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Catalog(err) => err.code(),
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Catalog(CatalogError::StoreUnavailable(reason)) => {
                tracing::error!("Object store unavailable: {}", reason);
                "The document store is unavailable".to_string()
            },
            AppError::Catalog(CatalogError::Encoding(reason)) => {
                tracing::error!("Internal error: {}", reason);
                "An internal error occurred".to_string()
            },
            other => other.to_string(),
        };

        (status, Json(ErrorResponse::new(self.code(), message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfdesk_common::Field;

    #[test]
    fn test_catalog_status_mapping() {
        let cases = [
            (CatalogError::InvalidName("x".into()), StatusCode::BAD_REQUEST),
            (
                CatalogError::InvalidSelection {
                    field: Field::Tags,
                    token: "All".into(),
                },
                StatusCode::BAD_REQUEST,
            ),
            (CatalogError::NotFound("k".into()), StatusCode::NOT_FOUND),
            (CatalogError::MalformedRecord("r".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (CatalogError::StoreUnavailable("s".into()), StatusCode::SERVICE_UNAVAILABLE),
            (CatalogError::Encoding("e".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Validation("x".into()).code(), "VALIDATION_ERROR");
        assert_eq!(AppError::BadRequest("x".into()).code(), "BAD_REQUEST");
        assert_eq!(
            AppError::from(CatalogError::NotFound("k".into())).code(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::from(CatalogError::StoreUnavailable("down".into())).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
