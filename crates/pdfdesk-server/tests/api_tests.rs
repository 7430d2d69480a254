//! HTTP API integration tests
//!
//! Drive the full router (middleware included) against an in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use pdfdesk_server::{
    api,
    catalog::{Catalog, MetadataMode},
    config::Config,
    storage::{MemoryStore, ObjectStore, StoreOp},
};
use serde_json::{json, Value};
use tower::ServiceExt; // for `oneshot`

const BOUNDARY: &str = "pdfdesk-test-boundary";

fn setup_app(mode: MetadataMode) -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let catalog = Catalog::new(Arc::new(store.clone()), mode, "documents/");
    (api::create_router(catalog, &Config::default()), store)
}

/// Multipart body with one `file` part per `(file_name, content)` and an optional
/// `entries` part
fn multipart_body(files: &[(&str, &[u8])], entries: Option<Value>) -> Vec<u8> {
    let mut body = Vec::new();
    for (file_name, content) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: application/pdf\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    if let Some(entries) = entries {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"entries\"\r\nContent-Type: application/json\r\n\r\n{entries}\r\n"
            )
            .as_bytes(),
        );
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/documents")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_and_health() {
    let (app, _store) = setup_app(MetadataMode::Sidecar);

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["name"], "pdfdesk");

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_options() {
    let (app, _store) = setup_app(MetadataMode::Attributes);

    let response = app.oneshot(get("/api/v1/options")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["metadata_mode"], "attributes");
    assert_eq!(json["data"]["fields"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_upload_with_entries_then_list() {
    let (app, store) = setup_app(MetadataMode::Sidecar);

    let body = multipart_body(
        &[("scan-01.pdf", b"%PDF-1.7 one"), ("scan-02.pdf", b"%PDF-1.7 two")],
        Some(json!([
            { "display_name": "Exam Rules", "semesters": ["All"], "tags": ["Rulebook"] }
        ])),
    );
    let response = app.clone().oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = json_body(response).await;
    assert_eq!(json["data"]["completed"], 2);
    assert_eq!(json["data"]["outcomes"][0]["key"], "documents/Exam Rules.pdf");
    assert_eq!(json["data"]["outcomes"][1]["key"], "documents/scan-02.pdf");
    assert!(store.contains("documents/Exam Rules.csv"));

    let response = app.oneshot(get("/api/v1/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["meta"]["total"], 2);
    assert_eq!(json["data"]["documents"][0]["name"], "Exam Rules");
}

#[tokio::test]
async fn test_upload_partial_is_multi_status() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    store.fail(StoreOp::Put, "documents/b.pdf");

    let body = multipart_body(
        &[("a.pdf", b"%PDF a"), ("b.pdf", b"%PDF b"), ("c.pdf", b"%PDF c")],
        None,
    );
    let response = app.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::MULTI_STATUS);

    let json = json_body(response).await;
    assert_eq!(json["data"]["completed"], 2);
    assert_eq!(json["data"]["failed"], 1);
    assert_eq!(json["data"]["outcomes"][1]["document"]["status"], "failed");
    assert_eq!(json["data"]["outcomes"][1]["metadata"]["status"], "skipped");
}

#[tokio::test]
async fn test_upload_nameless_part_fails_alone() {
    let (app, store) = setup_app(MetadataMode::Sidecar);

    let body = multipart_body(
        &[("a.pdf", b"%PDF a"), ("", b"%PDF nameless"), ("c.pdf", b"%PDF c")],
        None,
    );
    let response = app.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::MULTI_STATUS);

    let json = json_body(response).await;
    assert_eq!(json["data"]["completed"], 2);
    assert_eq!(json["data"]["failed"], 1);
    assert_eq!(json["data"]["outcomes"][1]["document"]["status"], "failed");
    assert_eq!(json["data"]["outcomes"][1]["document"]["code"], "VALIDATION_ERROR");
    assert!(store.contains("documents/a.pdf"));
    assert!(store.contains("documents/c.pdf"));
}

#[tokio::test]
async fn test_upload_without_files_is_rejected() {
    let (app, _store) = setup_app(MetadataMode::Sidecar);

    let response = app
        .oneshot(upload_request(multipart_body(&[], None)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_upload_rejects_more_entries_than_files() {
    let (app, _store) = setup_app(MetadataMode::Sidecar);

    let body = multipart_body(&[("a.pdf", b"%PDF")], Some(json!([{}, {}])));
    let response = app.oneshot(upload_request(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_edit_roundtrip_over_http() {
    let (app, store) = setup_app(MetadataMode::Attributes);
    store
        .put("documents/Notice.pdf", Bytes::from_static(b"%PDF notice"), None)
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(get("/api/v1/documents/Notice/metadata"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"]["state"], "missing");
    assert_eq!(json["data"]["record"]["display_name"], "Notice");

    let update = json!({
        "display_name": "Holiday Notice",
        "departments": ["All"],
        "tags": ["Notice", "Announcement"]
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/documents/Notice/metadata")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(update.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["data"]["key"], "documents/Notice.pdf");
    assert_eq!(json["data"]["record"]["departments"].as_array().unwrap().len(), 8);

    let response = app
        .clone()
        .oneshot(get("/api/v1/documents/Notice/metadata"))
        .await
        .unwrap();
    let json = json_body(response).await;
    assert_eq!(json["data"]["status"]["state"], "stored");
    assert_eq!(json["data"]["record"]["display_name"], "Holiday Notice");

    let response = app
        .oneshot(get("/api/v1/documents/Notice/content"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, Bytes::from_static(b"%PDF notice"));
}

#[tokio::test]
async fn test_update_invalid_selection() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    store
        .put("documents/a.pdf", Bytes::from_static(b"%PDF"), None)
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/v1/documents/a/metadata")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "tags": ["All"] }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_SELECTION");
}

#[tokio::test]
async fn test_missing_document_is_not_found() {
    let (app, _store) = setup_app(MetadataMode::Sidecar);

    for uri in ["/api/v1/documents/ghost/metadata", "/api/v1/documents/ghost/content"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
        let json = json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_store_outage_is_service_unavailable() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    store.fail(StoreOp::List, "documents/");

    let response = app.oneshot(get("/api/v1/documents")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(response).await["error"]["code"], "STORE_UNAVAILABLE");
}

#[tokio::test]
async fn test_delete_complete_and_partial() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    for key in ["documents/a.pdf", "documents/a.csv", "documents/b.pdf", "documents/b.csv"] {
        store.put(key, Bytes::from_static(b"x"), None).await.unwrap();
    }
    store.fail(StoreOp::Delete, "documents/b.csv");

    let delete = |uri: &str| {
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete("/api/v1/documents/a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(delete("/api/v1/documents/b")).await.unwrap();
    assert_eq!(response.status(), StatusCode::MULTI_STATUS);
    let json = json_body(response).await;
    assert_eq!(json["data"]["document"]["status"], "succeeded");
    assert_eq!(json["data"]["metadata"]["status"], "failed");

    assert_eq!(store.list("documents/").await.unwrap(), vec!["documents/b.csv"]);
}

#[tokio::test]
async fn test_nested_key_listed_name_addresses_it() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    for (key, body) in [("documents/a.pdf", b"%PDF top"), ("documents/sub/a.pdf", b"%PDF sub")] {
        store.put(key, Bytes::from_static(body), None).await.unwrap();
    }

    let response = app.clone().oneshot(get("/api/v1/documents")).await.unwrap();
    let json = json_body(response).await;
    assert_eq!(json["data"]["documents"][1]["key"], "documents/sub/a.pdf");
    assert_eq!(json["data"]["documents"][1]["name"], "sub/a");

    let response = app
        .oneshot(get("/api/v1/documents/sub%2Fa/content"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(body, Bytes::from_static(b"%PDF sub"));
}

#[tokio::test]
async fn test_names_with_spaces_are_percent_decoded() {
    let (app, store) = setup_app(MetadataMode::Sidecar);
    store
        .put("documents/Lecture 1.pdf", Bytes::from_static(b"%PDF"), None)
        .await
        .unwrap();

    let response = app
        .oneshot(get("/api/v1/documents/Lecture%201/content"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "inline; filename*=UTF-8''Lecture%201.pdf"
    );
}
