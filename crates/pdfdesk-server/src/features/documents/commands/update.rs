use mediator::Request;
use pdfdesk_common::{CatalogError, MetadataInput, MetadataRecord};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMetadataCommand {
    /// Document name, without prefix or extension
    pub name: String,
    pub metadata: MetadataInput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMetadataResponse {
    pub key: String,
    pub record: MetadataRecord,
}

#[derive(Debug, thiserror::Error)]
pub enum UpdateMetadataError {
    #[error("Document name is required and cannot be empty")]
    NameRequired,
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl Request<Result<UpdateMetadataResponse, UpdateMetadataError>> for UpdateMetadataCommand {}

impl UpdateMetadataCommand {
    pub fn validate(&self) -> Result<(), UpdateMetadataError> {
        if self.name.trim().is_empty() {
            return Err(UpdateMetadataError::NameRequired);
        }
        Ok(())
    }
}

/// Replaces the whole record. The document key stays the same even when the display name
/// changes.
#[tracing::instrument(skip(catalog, command), fields(name = %command.name))]
pub async fn handle(
    catalog: Catalog,
    command: UpdateMetadataCommand,
) -> Result<UpdateMetadataResponse, UpdateMetadataError> {
    command.validate()?;

    let key = catalog.document_key(&command.name);
    let record = catalog.save_edit(&key, &command.metadata).await?;

    Ok(UpdateMetadataResponse { key, record })
}
