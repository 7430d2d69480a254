use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, DeleteOutcome};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteDocumentCommand {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteDocumentError {
    #[error("Document name is required and cannot be empty")]
    NameRequired,
}

impl Request<Result<DeleteOutcome, DeleteDocumentError>> for DeleteDocumentCommand {}

impl DeleteDocumentCommand {
    pub fn validate(&self) -> Result<(), DeleteDocumentError> {
        if self.name.trim().is_empty() {
            return Err(DeleteDocumentError::NameRequired);
        }
        Ok(())
    }
}

/// Both halves are attempted; the outcome says which of them succeeded.
#[tracing::instrument(skip(catalog, command), fields(name = %command.name))]
pub async fn handle(
    catalog: Catalog,
    command: DeleteDocumentCommand,
) -> Result<DeleteOutcome, DeleteDocumentError> {
    command.validate()?;

    let key = catalog.document_key(&command.name);
    Ok(catalog.delete(&key).await)
}
