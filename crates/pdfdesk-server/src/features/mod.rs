//! Feature modules implementing the pdfdesk API
//!
//! Each feature is a vertical slice with its own commands, queries and routes:
//!
//! - **documents**: upload, list, edit, download and delete catalog documents
//! - **options**: the selectable departments, semesters and tags
//!
//! Commands and queries implement `mediator::Request` and are registered in
//! [`crate::cqrs::build_mediator`].

pub mod documents;
pub mod options;

use axum::Router;

use crate::catalog::Catalog;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    /// Catalog over the configured object store
    pub catalog: Catalog,
}

/// Mounts every feature under its own path prefix:
/// - `/documents` - Document catalog
/// - `/options` - Enumerations for the metadata forms
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/documents", documents::documents_routes().with_state(state.catalog.clone()))
        .nest("/options", options::options_routes().with_state(state.catalog))
}
