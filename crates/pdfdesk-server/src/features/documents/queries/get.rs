use mediator::Request;
use pdfdesk_common::CatalogError;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, EditView};

/// Load a document's record for the edit form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetMetadataQuery {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum GetMetadataError {
    #[error("Document name is required and cannot be empty")]
    NameRequired,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Request<Result<EditView, GetMetadataError>> for GetMetadataQuery {}

impl GetMetadataQuery {
    pub fn validate(&self) -> Result<(), GetMetadataError> {
        if self.name.trim().is_empty() {
            return Err(GetMetadataError::NameRequired);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(catalog, query), fields(name = %query.name))]
pub async fn handle(catalog: Catalog, query: GetMetadataQuery) -> Result<EditView, GetMetadataError> {
    query.validate()?;

    let key = catalog.document_key(&query.name);
    Ok(catalog.fetch_for_edit(&key).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MetadataMode, RecordStatus};
    use crate::storage::{MemoryStore, ObjectStore};
    use bytes::Bytes;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_document_without_record_gets_defaults() {
        let store = MemoryStore::new();
        store
            .put("documents/Handbook.pdf", Bytes::from_static(b"%PDF"), None)
            .await
            .unwrap();
        let catalog = Catalog::new(Arc::new(store), MetadataMode::Sidecar, "documents/");

        let view = handle(
            catalog,
            GetMetadataQuery {
                name: "Handbook".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(view.status, RecordStatus::Missing);
        assert_eq!(view.record.display_name, "Handbook");
        assert!(view.record.tags.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_document() {
        let catalog = Catalog::new(Arc::new(MemoryStore::new()), MetadataMode::Sidecar, "documents/");
        assert!(matches!(
            handle(
                catalog,
                GetMetadataQuery {
                    name: "ghost".to_string()
                }
            )
            .await,
            Err(GetMetadataError::Catalog(CatalogError::NotFound(_)))
        ));
    }
}
