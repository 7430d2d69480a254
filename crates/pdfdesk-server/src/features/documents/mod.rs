//! Document catalog feature
//!
//! Upload, list, edit and delete PDFs with their metadata records.

pub mod commands;
pub mod queries;
pub mod routes;

pub use routes::documents_routes;
