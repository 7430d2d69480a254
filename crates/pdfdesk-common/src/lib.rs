//! pdfdesk Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Domain types, metadata encodings, selection rules and error handling shared by
//! the pdfdesk workspace members.
//!
//! # Overview
//!
//! - **Types**: the three fixed enumerations and the per-document [`MetadataRecord`]
//! - **Resolver**: expansion of the "All" catch-all and validation of selected tokens
//! - **Codec**: sidecar CSV and in-band attribute encodings of a record
//! - **Error Handling**: the [`CatalogError`] taxonomy and result alias
//! - **Logging**: subscriber setup driven by environment variables
//!
//! # Example
//!
//! ```no_run
//! use pdfdesk_common::{codec, resolver, MetadataInput};
//!
//! fn sidecar_for(input: &MetadataInput) -> pdfdesk_common::Result<Vec<u8>> {
//!     let record = resolver::resolve_input(input, "lecture-01")?;
//!     codec::encode_csv(&record)
//! }
//! ```

pub mod codec;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use error::{CatalogError, Result};
pub use types::{Field, MetadataInput, MetadataRecord, CATCH_ALL};
