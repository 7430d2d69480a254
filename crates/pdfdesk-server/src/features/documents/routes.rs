//! Document API routes
//!
//! - `POST /api/v1/documents` - Upload PDFs (multipart)
//! - `GET /api/v1/documents` - List documents
//! - `GET /api/v1/documents/:name/metadata` - Record for the edit form
//! - `PUT /api/v1/documents/:name/metadata` - Replace the record
//! - `GET /api/v1/documents/:name/content` - PDF bytes
//! - `DELETE /api/v1/documents/:name` - Delete document and record

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use pdfdesk_common::MetadataInput;
use serde_json::json;

use super::{
    commands::{
        DeleteDocumentCommand, DeleteDocumentError, IngestDocumentsCommand, IngestDocumentsError,
        UpdateMetadataCommand, UpdateMetadataError,
    },
    queries::{
        GetContentError, GetContentQuery, GetMetadataError, GetMetadataQuery, ListDocumentsError,
        ListDocumentsQuery,
    },
};
use crate::api::response::ApiResponse;
use crate::catalog::{Catalog, IngestItem};
use crate::error::AppError;

/// Multipart part carrying a PDF
const FILE_FIELD: &str = "file";
/// Multipart part carrying a JSON array of metadata entries, one per file part
const ENTRIES_FIELD: &str = "entries";

pub fn documents_routes() -> Router<Catalog> {
    Router::new()
        .route("/", post(upload_documents).get(list_documents))
        .route("/:name", delete(delete_document))
        .route("/:name/metadata", get(get_metadata).put(update_metadata))
        .route("/:name/content", get(get_content))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Upload one or more PDFs
///
/// # Response
///
/// - `201 Created` - Every file and its record stored
/// - `207 Multi-Status` - At least one file failed or was stored without its record
/// - `400 Bad Request` - No files, or unreadable `entries`
#[tracing::instrument(skip(catalog, multipart))]
async fn upload_documents(
    State(catalog): State<Catalog>,
    multipart: Multipart,
) -> Result<Response, DocumentApiError> {
    let command = read_upload(multipart).await?;
    let response = super::commands::ingest::handle(catalog, command).await?;

    tracing::info!(
        completed = response.completed,
        partial = response.partial,
        failed = response.failed,
        "Documents uploaded via API"
    );

    let status = if response.all_completed() {
        StatusCode::CREATED
    } else {
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(ApiResponse::success(response))).into_response())
}

#[tracing::instrument(skip(catalog, metadata))]
async fn update_metadata(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
    Json(metadata): Json<MetadataInput>,
) -> Result<Response, DocumentApiError> {
    let command = UpdateMetadataCommand { name, metadata };
    let response = super::commands::update::handle(catalog, command).await?;

    tracing::info!(key = %response.key, "Metadata updated via API");

    Ok((StatusCode::OK, Json(ApiResponse::success(response))).into_response())
}

/// Delete a document and its record
///
/// # Response
///
/// - `200 OK` - Both removed
/// - `207 Multi-Status` - One half could not be removed
#[tracing::instrument(skip(catalog))]
async fn delete_document(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Result<Response, DocumentApiError> {
    let outcome = super::commands::delete::handle(catalog, DeleteDocumentCommand { name }).await?;

    let status = if outcome.is_complete() {
        StatusCode::OK
    } else {
        tracing::warn!(key = %outcome.key, "Document only partially deleted");
        StatusCode::MULTI_STATUS
    };
    Ok((status, Json(ApiResponse::success(outcome))).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(catalog))]
async fn list_documents(State(catalog): State<Catalog>) -> Result<Response, DocumentApiError> {
    let response = super::queries::list::handle(catalog, ListDocumentsQuery::default()).await?;
    let total = response.documents.len();

    Ok(ApiResponse::success_with_meta(response, json!({ "total": total })).into_response())
}

#[tracing::instrument(skip(catalog))]
async fn get_metadata(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Result<Response, DocumentApiError> {
    let view = super::queries::get::handle(catalog, GetMetadataQuery { name }).await?;
    Ok(ApiResponse::success(view).into_response())
}

#[tracing::instrument(skip(catalog))]
async fn get_content(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Result<Response, DocumentApiError> {
    let content = super::queries::content::handle(catalog, GetContentQuery { name }).await?;

    let disposition = format!(
        "inline; filename*=UTF-8''{}",
        urlencoding::encode(&content.file_name)
    );
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        content.data,
    )
        .into_response())
}

/// Collect file parts and the optional `entries` part into an ingest command.
///
/// Entries are matched to files by position; files without an entry get default metadata.
async fn read_upload(mut multipart: Multipart) -> Result<IngestDocumentsCommand, DocumentApiError> {
    let mut files = Vec::new();
    let mut entries: Vec<MetadataInput> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DocumentApiError::Upload(format!("Failed to read multipart field: {e}")))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content = field.bytes().await.map_err(|e| {
                    DocumentApiError::Upload(format!("Failed to read file bytes: {e}"))
                })?;
                files.push((file_name, content));
            },
            Some(ENTRIES_FIELD) => {
                let raw = field.bytes().await.map_err(|e| {
                    DocumentApiError::Upload(format!("Failed to read entries: {e}"))
                })?;
                entries = serde_json::from_slice(&raw)
                    .map_err(|e| DocumentApiError::Upload(format!("Invalid entries JSON: {e}")))?;
            },
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            },
        }
    }

    if entries.len() > files.len() {
        return Err(DocumentApiError::Upload(format!(
            "{} metadata entries supplied for {} files",
            entries.len(),
            files.len()
        )));
    }

    let mut entries = entries.into_iter();
    let items = files
        .into_iter()
        .map(|(file_name, content)| IngestItem {
            file_name,
            content,
            metadata: entries.next().unwrap_or_default(),
        })
        .collect();

    Ok(IngestDocumentsCommand { items })
}

// ============================================================================
// Error Mapping
// ============================================================================

#[derive(Debug, thiserror::Error)]
enum DocumentApiError {
    #[error("{0}")]
    Upload(String),
    #[error(transparent)]
    Ingest(#[from] IngestDocumentsError),
    #[error(transparent)]
    Update(#[from] UpdateMetadataError),
    #[error(transparent)]
    Delete(#[from] DeleteDocumentError),
    #[error(transparent)]
    List(#[from] ListDocumentsError),
    #[error(transparent)]
    Get(#[from] GetMetadataError),
    #[error(transparent)]
    Content(#[from] GetContentError),
}

impl IntoResponse for DocumentApiError {
    fn into_response(self) -> Response {
        match self {
            DocumentApiError::Upload(reason) => AppError::BadRequest(reason).into_response(),
            DocumentApiError::Ingest(_)
            | DocumentApiError::Update(UpdateMetadataError::NameRequired)
            | DocumentApiError::Delete(DeleteDocumentError::NameRequired)
            | DocumentApiError::Get(GetMetadataError::NameRequired)
            | DocumentApiError::Content(GetContentError::NameRequired) => {
                AppError::Validation(self.to_string()).into_response()
            },
            DocumentApiError::Update(UpdateMetadataError::Catalog(err))
            | DocumentApiError::List(ListDocumentsError::Catalog(err))
            | DocumentApiError::Get(GetMetadataError::Catalog(err))
            | DocumentApiError::Content(GetContentError::Catalog(err)) => {
                AppError::from(err).into_response()
            },
        }
    }
}
