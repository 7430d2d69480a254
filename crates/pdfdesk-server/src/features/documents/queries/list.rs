use mediator::Request;
use pdfdesk_common::CatalogError;
use serde::{Deserialize, Serialize};

use crate::catalog::{keys, Catalog};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDocumentsQuery {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub key: String,
    /// Name used in document routes
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDocumentsResponse {
    pub documents: Vec<DocumentEntry>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListDocumentsError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Request<Result<ListDocumentsResponse, ListDocumentsError>> for ListDocumentsQuery {}

#[tracing::instrument(skip(catalog, _query))]
pub async fn handle(
    catalog: Catalog,
    _query: ListDocumentsQuery,
) -> Result<ListDocumentsResponse, ListDocumentsError> {
    let documents = catalog
        .list()
        .await?
        .into_iter()
        .map(|key| DocumentEntry {
            name: keys::document_name(catalog.prefix(), &key).to_string(),
            key,
        })
        .collect();

    Ok(ListDocumentsResponse { documents })
}
