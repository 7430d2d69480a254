//! Per-step results of multi-step catalog operations

use pdfdesk_common::{CatalogError, MetadataRecord};
use serde::{Deserialize, Serialize};

/// Result of one store-facing step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded,
    Failed { code: String, message: String },
    /// Not attempted because an earlier step failed
    Skipped,
}

impl StepOutcome {
    pub fn failed(err: &CatalogError) -> Self {
        StepOutcome::Failed {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }

    pub fn from_result<T>(result: &Result<T, CatalogError>) -> Self {
        match result {
            Ok(_) => StepOutcome::Succeeded,
            Err(err) => StepOutcome::failed(err),
        }
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, StepOutcome::Succeeded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }
}

/// Outcome of ingesting one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOutcome {
    /// File name as uploaded
    pub source: String,
    /// Document key, once one could be derived
    pub key: Option<String>,
    pub document: StepOutcome,
    pub metadata: StepOutcome,
    /// Hex SHA-256 of the stored content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record: Option<MetadataRecord>,
}

impl IngestOutcome {
    /// Rejected before anything was written
    pub fn rejected(source: impl Into<String>, key: Option<String>, err: &CatalogError) -> Self {
        Self {
            source: source.into(),
            key,
            document: StepOutcome::failed(err),
            metadata: StepOutcome::Skipped,
            checksum: None,
            size: None,
            record: None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.document.is_succeeded() && self.metadata.is_succeeded()
    }

    /// Document stored but its metadata is missing
    pub fn is_partial(&self) -> bool {
        self.document.is_succeeded() && self.metadata.is_failed()
    }
}

/// Outcome of deleting a document and its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub key: String,
    pub document: StepOutcome,
    pub metadata: StepOutcome,
}

impl DeleteOutcome {
    pub fn is_complete(&self) -> bool {
        self.document.is_succeeded() && self.metadata.is_succeeded()
    }
}
