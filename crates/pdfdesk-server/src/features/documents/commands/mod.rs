pub mod delete;
pub mod ingest;
pub mod update;

pub use delete::{DeleteDocumentCommand, DeleteDocumentError};
pub use ingest::{IngestDocumentsCommand, IngestDocumentsError, IngestDocumentsResponse};
pub use update::{UpdateMetadataCommand, UpdateMetadataError, UpdateMetadataResponse};
