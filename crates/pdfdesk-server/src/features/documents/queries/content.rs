use bytes::Bytes;
use mediator::Request;
use pdfdesk_common::CatalogError;
use serde::{Deserialize, Serialize};

use crate::catalog::{keys::DOCUMENT_EXTENSION, Catalog};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetContentQuery {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct DocumentContent {
    pub key: String,
    /// File name offered to the browser
    pub file_name: String,
    pub data: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum GetContentError {
    #[error("Document name is required and cannot be empty")]
    NameRequired,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Request<Result<DocumentContent, GetContentError>> for GetContentQuery {}

impl GetContentQuery {
    pub fn validate(&self) -> Result<(), GetContentError> {
        if self.name.trim().is_empty() {
            return Err(GetContentError::NameRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(catalog, query), fields(name = %query.name))]
pub async fn handle(catalog: Catalog, query: GetContentQuery) -> Result<DocumentContent, GetContentError> {
    query.validate()?;

    let key = catalog.document_key(&query.name);
    let data = catalog.content(&key).await?;

    tracing::debug!(key = %key, size = data.len(), "Document content read");

    Ok(DocumentContent {
        file_name: format!("{}{}", query.name, DOCUMENT_EXTENSION),
        key,
        data,
    })
}
