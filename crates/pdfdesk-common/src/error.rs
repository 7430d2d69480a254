//! Error types for pdfdesk

use thiserror::Error;

use crate::types::Field;

/// Result type alias for catalog operations
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Failure taxonomy shared by the codec, the resolver and the catalog service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Network, credential or transient backend failure. Never retried here.
    #[error("Object store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed metadata record: {0}")]
    MalformedRecord(String),

    #[error("Invalid {field} selection: '{token}' is not a recognised option")]
    InvalidSelection { field: Field, token: String },

    #[error("Invalid document name: {0}")]
    InvalidName(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl CatalogError {
    /// Stable machine-readable code, used in API payloads and per-item outcomes
    pub fn code(&self) -> &'static str {
        match self {
            CatalogError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            CatalogError::NotFound(_) => "NOT_FOUND",
            CatalogError::MalformedRecord(_) => "MALFORMED_RECORD",
            CatalogError::InvalidSelection { .. } => "INVALID_SELECTION",
            CatalogError::InvalidName(_) | CatalogError::InvalidDocument(_) => "VALIDATION_ERROR",
            CatalogError::Encoding(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<csv::Error> for CatalogError {
    fn from(err: csv::Error) -> Self {
        CatalogError::MalformedRecord(err.to_string())
    }
}
