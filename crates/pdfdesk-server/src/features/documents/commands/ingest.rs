use mediator::Request;
use serde::Serialize;

use crate::catalog::{Catalog, IngestItem, IngestOutcome};

/// Upload one or more PDFs with the metadata entered for each
#[derive(Debug, Clone, Default)]
pub struct IngestDocumentsCommand {
    pub items: Vec<IngestItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngestDocumentsResponse {
    pub outcomes: Vec<IngestOutcome>,
    /// Document and metadata both stored
    pub completed: usize,
    /// Document stored, metadata failed
    pub partial: usize,
    /// Nothing stored
    pub failed: usize,
}

impl IngestDocumentsResponse {
    fn from_outcomes(outcomes: Vec<IngestOutcome>) -> Self {
        let completed = outcomes.iter().filter(|o| o.is_complete()).count();
        let partial = outcomes.iter().filter(|o| o.is_partial()).count();
        Self {
            failed: outcomes.len() - completed - partial,
            completed,
            partial,
            outcomes,
        }
    }

    pub fn all_completed(&self) -> bool {
        self.completed == self.outcomes.len()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestDocumentsError {
    #[error("At least one file is required")]
    NoFiles,
}

impl Request<Result<IngestDocumentsResponse, IngestDocumentsError>> for IngestDocumentsCommand {}

impl IngestDocumentsCommand {
    pub fn validate(&self) -> Result<(), IngestDocumentsError> {
        if self.items.is_empty() {
            return Err(IngestDocumentsError::NoFiles);
        }
        Ok(())
    }
}

/// Per-file problems (missing name, wrong extension, bad selection, store outage) are
/// reported in the outcomes, not as an error.
#[tracing::instrument(skip(catalog, command), fields(files = command.items.len()))]
pub async fn handle(
    catalog: Catalog,
    command: IngestDocumentsCommand,
) -> Result<IngestDocumentsResponse, IngestDocumentsError> {
    command.validate()?;

    let outcomes = catalog.ingest_batch(command.items).await;
    Ok(IngestDocumentsResponse::from_outcomes(outcomes))
}
