//! Document catalog
//!
//! Keeps every PDF object and its metadata record in step:
//!
//! - **ingest** writes the PDF, then its record; a record failure is reported as a partial
//!   outcome and the PDF is left in place
//! - **list** returns document keys only, never sidecars
//! - **fetch_for_edit** always yields a record to edit, substituting defaults when the stored
//!   one is missing or unreadable, and says which case applied
//! - **save_edit** rewrites the record only; document bytes and key never change
//! - **delete** removes the PDF and then the record, attempting both
//!
//! There is no cross-object transaction and no retry. Concurrent edits of one document are
//! not coordinated: the last write wins.

use std::sync::Arc;

use bytes::Bytes;
use pdfdesk_common::{resolver, CatalogError, MetadataInput, MetadataRecord, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, instrument, warn};

pub mod keys;
pub mod outcome;
pub mod strategy;

pub use outcome::{DeleteOutcome, IngestOutcome, StepOutcome};
pub use strategy::{AttributeStrategy, MetadataMode, MetadataStrategy, SidecarStrategy};

use crate::storage::ObjectStore;

/// One uploaded file and the metadata entered for it
#[derive(Debug, Clone)]
pub struct IngestItem {
    pub file_name: String,
    pub content: Bytes,
    pub metadata: MetadataInput,
}

/// How the record shown for editing was obtained
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RecordStatus {
    /// Read from the store
    Stored,
    /// No record exists; defaults shown
    Missing,
    /// A record exists but could not be read; defaults shown
    Unreadable { code: String, message: String },
}

/// A document's record prepared for the edit form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditView {
    pub key: String,
    pub record: MetadataRecord,
    pub status: RecordStatus,
}

#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn ObjectStore>,
    strategy: Arc<dyn MetadataStrategy>,
    prefix: String,
}

impl Catalog {
    pub fn new(store: Arc<dyn ObjectStore>, mode: MetadataMode, prefix: impl Into<String>) -> Self {
        Self::with_strategy(store, mode.strategy(), prefix)
    }

    pub fn with_strategy(
        store: Arc<dyn ObjectStore>,
        strategy: Arc<dyn MetadataStrategy>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            store,
            strategy,
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn mode(&self) -> MetadataMode {
        self.strategy.mode()
    }

    /// Key of the document stored under `name`
    pub fn document_key(&self, name: &str) -> String {
        keys::document_key(&self.prefix, name)
    }

    /// Store one PDF and its record.
    ///
    /// Never fails as a whole: every failure is captured in the returned outcome.
    #[instrument(skip(self, item), fields(source = %item.file_name, size = item.content.len()))]
    pub async fn ingest(&self, item: IngestItem) -> IngestOutcome {
        let (key, record) = match self.prepare(&item) {
            Ok(prepared) => prepared,
            Err(err) => {
                warn!(error = %err, "Upload rejected");
                return IngestOutcome::rejected(item.file_name, None, &err);
            },
        };

        let checksum = calculate_sha256(&item.content);
        let size = item.content.len() as u64;

        if let Err(err) = self.store.put(&key, item.content, None).await {
            let err = CatalogError::from(err);
            warn!(key = %key, error = %err, "Document write failed; metadata not attempted");
            return IngestOutcome::rejected(item.file_name, Some(key), &err);
        }

        let metadata = self.strategy.save(self.store.as_ref(), &key, &record).await;
        match &metadata {
            Ok(()) => info!(key = %key, checksum = %checksum, "Document ingested"),
            Err(err) => warn!(
                key = %key,
                error = %err,
                "Document stored without metadata"
            ),
        }

        IngestOutcome {
            source: item.file_name,
            key: Some(key),
            document: StepOutcome::Succeeded,
            metadata: StepOutcome::from_result(&metadata),
            checksum: Some(checksum),
            size: Some(size),
            record: Some(record),
        }
    }

    /// Ingest items one after another. A failed item never stops the rest.
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn ingest_batch(&self, items: Vec<IngestItem>) -> Vec<IngestOutcome> {
        let mut outcomes = Vec::with_capacity(items.len());
        for item in items {
            outcomes.push(self.ingest(item).await);
        }

        let complete = outcomes.iter().filter(|o| o.is_complete()).count();
        info!(complete, failed = outcomes.len() - complete, "Batch ingest finished");
        outcomes
    }

    /// Document keys under the prefix, sorted. Sidecars are excluded.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut documents: Vec<String> = self
            .store
            .list(&self.prefix)
            .await?
            .into_iter()
            .filter(|key| key.ends_with(keys::DOCUMENT_EXTENSION))
            .collect();
        documents.sort();
        Ok(documents)
    }

    /// Record for the edit form.
    ///
    /// Fails only when the document itself is absent or the store cannot be reached to
    /// check. Any problem reading the record yields defaults plus an `Unreadable` status.
    #[instrument(skip(self))]
    pub async fn fetch_for_edit(&self, key: &str) -> Result<EditView> {
        self.ensure_document(key).await?;
        let stem = keys::file_stem(key);

        let (record, status) = match self.strategy.load(self.store.as_ref(), key).await {
            Ok(Some(mut record)) => {
                if record.display_name.trim().is_empty() {
                    record.display_name = stem.to_string();
                }
                (record, RecordStatus::Stored)
            },
            Ok(None) => (MetadataRecord::with_name(stem), RecordStatus::Missing),
            Err(err) => {
                warn!(key = %key, error = %err, "Metadata unreadable; showing defaults");
                (
                    MetadataRecord::with_name(stem),
                    RecordStatus::Unreadable {
                        code: err.code().to_string(),
                        message: err.to_string(),
                    },
                )
            },
        };

        Ok(EditView {
            key: key.to_string(),
            record,
            status,
        })
    }

    /// Replace a document's record. The document content is not touched.
    #[instrument(skip(self, input))]
    pub async fn save_edit(&self, key: &str, input: &MetadataInput) -> Result<MetadataRecord> {
        self.ensure_document(key).await?;
        let record = resolver::resolve_input(input, keys::file_stem(key))?;

        self.strategy.save(self.store.as_ref(), key, &record).await?;

        info!(key = %key, "Metadata updated");
        Ok(record)
    }

    /// Remove a document and its record, reporting each half separately.
    #[instrument(skip(self))]
    pub async fn delete(&self, key: &str) -> DeleteOutcome {
        if !keys::is_document_key(&self.prefix, key) {
            let err = CatalogError::InvalidName(format!("'{key}' is not a document key"));
            return DeleteOutcome {
                key: key.to_string(),
                document: StepOutcome::failed(&err),
                metadata: StepOutcome::Skipped,
            };
        }

        let document = self.store.delete(key).await.map_err(CatalogError::from);
        if let Err(ref err) = document {
            warn!(key = %key, error = %err, "Document delete failed");
        }

        let metadata = self.strategy.remove(self.store.as_ref(), key).await;
        if let Err(ref err) = metadata {
            warn!(key = %key, error = %err, "Metadata delete failed");
        }

        let outcome = DeleteOutcome {
            key: key.to_string(),
            document: StepOutcome::from_result(&document),
            metadata: StepOutcome::from_result(&metadata),
        };
        if outcome.is_complete() {
            info!(key = %key, "Document deleted");
        }
        outcome
    }

    /// Raw document bytes
    #[instrument(skip(self))]
    pub async fn content(&self, key: &str) -> Result<Bytes> {
        self.check_key(key)?;
        Ok(self.store.get(key).await?)
    }

    fn prepare(&self, item: &IngestItem) -> Result<(String, MetadataRecord)> {
        if !keys::has_pdf_extension(&item.file_name) {
            return Err(CatalogError::InvalidDocument(format!(
                "'{}' is not a PDF file",
                item.file_name
            )));
        }
        if item.content.is_empty() {
            return Err(CatalogError::InvalidDocument(format!(
                "'{}' is empty",
                item.file_name
            )));
        }

        let record = resolver::resolve_input(&item.metadata, keys::file_stem(&item.file_name))?;
        let name = keys::safe_name(&record.display_name)?;
        Ok((self.document_key(&name), record))
    }

    fn check_key(&self, key: &str) -> Result<()> {
        if keys::is_document_key(&self.prefix, key) {
            Ok(())
        } else {
            Err(CatalogError::NotFound(key.to_string()))
        }
    }

    async fn ensure_document(&self, key: &str) -> Result<()> {
        self.check_key(key)?;
        self.store.attributes(key).await?;
        Ok(())
    }
}

fn calculate_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
