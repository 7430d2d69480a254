//! Metadata association strategies
//!
//! A deployment keeps a document's [`MetadataRecord`] either in a sidecar CSV object next
//! to the PDF or as attributes on the PDF object itself. Both sit behind
//! [`MetadataStrategy`] so the catalog has a single code path.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use pdfdesk_common::{codec, MetadataRecord, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::keys::sidecar_key;
use crate::storage::{Attributes, ObjectStore, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MetadataMode {
    /// `<name>.csv` object beside `<name>.pdf`
    #[default]
    Sidecar,
    /// Attributes attached to the `<name>.pdf` object
    Attributes,
}

impl MetadataMode {
    pub fn strategy(self) -> Arc<dyn MetadataStrategy> {
        match self {
            MetadataMode::Sidecar => Arc::new(SidecarStrategy),
            MetadataMode::Attributes => Arc::new(AttributeStrategy),
        }
    }
}

impl std::str::FromStr for MetadataMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sidecar" | "csv" => Ok(MetadataMode::Sidecar),
            "attributes" | "tags" | "inband" => Ok(MetadataMode::Attributes),
            _ => Err(anyhow::anyhow!("Invalid metadata mode: {}", s)),
        }
    }
}

impl std::fmt::Display for MetadataMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataMode::Sidecar => write!(f, "sidecar"),
            MetadataMode::Attributes => write!(f, "attributes"),
        }
    }
}

#[async_trait]
pub trait MetadataStrategy: Send + Sync + 'static {
    fn mode(&self) -> MetadataMode;

    /// The record for `document_key`, or `None` when it has never been written
    async fn load(&self, store: &dyn ObjectStore, document_key: &str) -> Result<Option<MetadataRecord>>;

    async fn save(&self, store: &dyn ObjectStore, document_key: &str, record: &MetadataRecord) -> Result<()>;

    /// Drop the record. Succeeds when there is nothing left to drop.
    async fn remove(&self, store: &dyn ObjectStore, document_key: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SidecarStrategy;

#[async_trait]
impl MetadataStrategy for SidecarStrategy {
    fn mode(&self) -> MetadataMode {
        MetadataMode::Sidecar
    }

    #[instrument(skip(self, store))]
    async fn load(&self, store: &dyn ObjectStore, document_key: &str) -> Result<Option<MetadataRecord>> {
        let key = sidecar_key(document_key);
        match store.get(&key).await {
            Ok(bytes) => codec::decode_csv(&bytes).map(Some),
            Err(StorageError::NotFound(_)) => {
                debug!(sidecar = %key, "No sidecar record");
                Ok(None)
            },
            Err(err) => Err(err.into()),
        }
    }

    #[instrument(skip(self, store, record))]
    async fn save(&self, store: &dyn ObjectStore, document_key: &str, record: &MetadataRecord) -> Result<()> {
        let encoded = codec::encode_csv(record)?;
        store
            .put(&sidecar_key(document_key), Bytes::from(encoded), None)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, store))]
    async fn remove(&self, store: &dyn ObjectStore, document_key: &str) -> Result<()> {
        store.delete(&sidecar_key(document_key)).await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeStrategy;

#[async_trait]
impl MetadataStrategy for AttributeStrategy {
    fn mode(&self) -> MetadataMode {
        MetadataMode::Attributes
    }

    #[instrument(skip(self, store))]
    async fn load(&self, store: &dyn ObjectStore, document_key: &str) -> Result<Option<MetadataRecord>> {
        let attributes = store.attributes(document_key).await?;
        if attributes.is_empty() {
            return Ok(None);
        }
        codec::decode_attributes(&attributes).map(Some)
    }

    #[instrument(skip(self, store, record))]
    async fn save(&self, store: &dyn ObjectStore, document_key: &str, record: &MetadataRecord) -> Result<()> {
        store
            .replace_attributes(document_key, codec::encode_attributes(record))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, store))]
    async fn remove(&self, store: &dyn ObjectStore, document_key: &str) -> Result<()> {
        match store.replace_attributes(document_key, Attributes::new()).await {
            // Attributes go with the object; nothing left to clear.
            Ok(()) | Err(StorageError::NotFound(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StoreOp};
    use pdfdesk_common::CatalogError;

    const DOC: &str = "documents/a.pdf";

    fn record() -> MetadataRecord {
        MetadataRecord::new("A", vec![], vec!["S1".into()], vec!["Notice".into()])
    }

    async fn store_with_document() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .put(DOC, Bytes::from_static(b"%PDF"), None)
            .await
            .expect("put");
        store
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("sidecar".parse::<MetadataMode>().unwrap(), MetadataMode::Sidecar);
        assert_eq!("Attributes".parse::<MetadataMode>().unwrap(), MetadataMode::Attributes);
        assert!("database".parse::<MetadataMode>().is_err());
        assert_eq!(MetadataMode::Attributes.strategy().mode(), MetadataMode::Attributes);
    }

    #[tokio::test]
    async fn test_sidecar_save_load_remove() {
        let store = store_with_document().await;
        let strategy = SidecarStrategy;

        assert_eq!(strategy.load(&store, DOC).await.unwrap(), None);

        strategy.save(&store, DOC, &record()).await.unwrap();
        assert!(store.contains("documents/a.csv"));
        assert_eq!(strategy.load(&store, DOC).await.unwrap(), Some(record()));

        strategy.remove(&store, DOC).await.unwrap();
        assert!(!store.contains("documents/a.csv"));
        assert!(store.contains(DOC));
    }

    #[tokio::test]
    async fn test_sidecar_malformed() {
        let store = store_with_document().await;
        store
            .put("documents/a.csv", Bytes::from_static(b"file_name,departments\r\nA,\r\n"), None)
            .await
            .unwrap();
        assert!(matches!(
            SidecarStrategy.load(&store, DOC).await,
            Err(CatalogError::MalformedRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_sidecar_unavailable() {
        let store = store_with_document().await;
        store.fail(StoreOp::Get, "documents/a.csv");
        assert!(matches!(
            SidecarStrategy.load(&store, DOC).await,
            Err(CatalogError::StoreUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_attributes_save_load_remove() {
        let store = store_with_document().await;
        let strategy = AttributeStrategy;

        assert_eq!(strategy.load(&store, DOC).await.unwrap(), None);

        strategy.save(&store, DOC, &record()).await.unwrap();
        assert_eq!(strategy.load(&store, DOC).await.unwrap(), Some(record()));
        assert_eq!(store.list("documents/").await.unwrap(), vec![DOC]);

        strategy.remove(&store, DOC).await.unwrap();
        assert_eq!(strategy.load(&store, DOC).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_attributes_remove_after_document_gone() {
        let store = MemoryStore::new();
        AttributeStrategy.remove(&store, DOC).await.unwrap();
    }

    #[tokio::test]
    async fn test_attributes_save_requires_document() {
        let store = MemoryStore::new();
        assert!(matches!(
            AttributeStrategy.save(&store, DOC, &record()).await,
            Err(CatalogError::NotFound(_))
        ));
    }
}
