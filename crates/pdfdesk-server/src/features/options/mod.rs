//! Selectable metadata options
//!
//! `GET /api/v1/options` lists every enumeration in display order so clients can render
//! the upload and edit forms without hard-coding them.

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use pdfdesk_common::{Field, CATCH_ALL};
use serde::Serialize;

use crate::api::response::ApiResponse;
use crate::catalog::{Catalog, MetadataMode};

#[derive(Debug, Clone, Serialize)]
pub struct FieldOptions {
    pub field: Field,
    pub values: Vec<&'static str>,
    /// Whether the catch-all token may be selected for this field
    pub accepts_all: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct OptionsResponse {
    pub catch_all: &'static str,
    pub metadata_mode: MetadataMode,
    pub fields: Vec<FieldOptions>,
}

pub fn options_routes() -> Router<Catalog> {
    Router::new().route("/", get(get_options))
}

pub fn options(mode: MetadataMode) -> OptionsResponse {
    OptionsResponse {
        catch_all: CATCH_ALL,
        metadata_mode: mode,
        fields: Field::ALL
            .iter()
            .map(|&field| FieldOptions {
                field,
                values: field.members().to_vec(),
                accepts_all: field.accepts_catch_all(),
            })
            .collect(),
    }
}

async fn get_options(State(catalog): State<Catalog>) -> impl IntoResponse {
    ApiResponse::success(options(catalog.mode()))
}
