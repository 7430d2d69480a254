//! pdfdesk server library
//!
//! HTTP service for a PDF document catalog kept in an S3-compatible bucket.
//!
//! # Overview
//!
//! - **Catalog**: ingest, list, edit and delete PDFs together with their metadata record
//! - **Storage**: object store gateway with S3 and in-memory backends
//! - **Metadata modes**: sidecar CSV object or attributes on the PDF object itself
//! - **Configuration**: environment-based, see [`config::Config`]
//! - **Middleware**: CORS and request tracing
//!
//! # Architecture
//!
//! Feature slices under [`features`] follow the command/query split:
//!
//! - **Commands** (ingest, update metadata, delete) change the bucket
//! - **Queries** (list, fetch for edit, content) only read it
//!
//! Each command and query is a plain struct with `validate()` and an async `handle()` taking
//! the [`catalog::Catalog`] handle. They are also registered with the mediator in [`cqrs`].
//!
//! # Example
//!
//! ```no_run
//! use pdfdesk_server::{api, catalog::Catalog, config::Config, storage};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let store = storage::init(storage::config::StorageConfig::from_env()?).await?;
//!     let catalog = Catalog::new(store, config.catalog.metadata_mode, config.catalog.prefix.clone());
//!     let app = api::create_router(catalog, &config);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod cqrs;
pub mod error;
pub mod features;
pub mod middleware;
pub mod storage;

pub use error::AppError;
