//! Object store gateway
//!
//! The catalog only ever talks to [`ObjectStore`]: a flat, path-keyed store with optional
//! string attributes per object. Two backends implement it:
//!
//! - [`S3Store`]: any S3-compatible service (AWS, MinIO)
//! - [`MemoryStore`]: process-local map, used for tests and local runs
//!
//! Backends never retry. Any transport, credential or service failure other than a missing
//! key surfaces as [`StorageError::Unavailable`] on the first attempt.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use pdfdesk_common::CatalogError;
use tracing::info;

pub mod config;
pub mod memory;
pub mod s3;

pub use memory::{MemoryStore, StoreOp};
pub use pdfdesk_common::codec::Attributes;
pub use s3::S3Store;

use config::{StorageBackend, StorageConfig};

/// Storage failures as seen by the catalog
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

impl From<StorageError> for CatalogError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => CatalogError::NotFound(key),
            StorageError::Unavailable(reason) => CatalogError::StoreUnavailable(reason),
        }
    }
}

#[async_trait]
pub trait ObjectStore: Send + Sync + 'static {
    /// Keys under `prefix`, sorted. Empty when nothing matches.
    async fn list(&self, prefix: &str) -> StorageResult<Vec<String>>;

    /// Full object content. `NotFound` when the key is absent.
    async fn get(&self, key: &str) -> StorageResult<Bytes>;

    /// Create or overwrite an object, replacing any attributes it had.
    async fn put(&self, key: &str, data: Bytes, attributes: Option<Attributes>) -> StorageResult<()>;

    /// Attributes attached to an object, without reading its content.
    /// `NotFound` when the key is absent.
    async fn attributes(&self, key: &str) -> StorageResult<Attributes>;

    /// Swap an object's attributes for `attributes`, leaving content untouched.
    /// `NotFound` when the key is absent.
    async fn replace_attributes(&self, key: &str, attributes: Attributes) -> StorageResult<()>;

    /// Remove an object. Removing an absent key succeeds.
    async fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Build the configured backend
pub async fn init(config: StorageConfig) -> anyhow::Result<Arc<dyn ObjectStore>> {
    match config.backend {
        StorageBackend::S3 => Ok(Arc::new(S3Store::new(config).await?)),
        StorageBackend::Memory => {
            info!("Using in-memory object store; documents will not survive a restart");
            Ok(Arc::new(MemoryStore::new()))
        },
    }
}

/// MIME type stored with an object, inferred from its key
pub fn content_type_for(key: &str) -> Option<&'static str> {
    let extension = key.rsplit_once('.')?.1.to_ascii_lowercase();
    match extension.as_str() {
        "pdf" => Some("application/pdf"),
        "csv" => Some("text/csv"),
        _ => None,
    }
}
