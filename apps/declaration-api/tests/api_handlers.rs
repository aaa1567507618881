//! Handler tests driven through the router with `oneshot`

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use declaration_api::{router, ApiConfig, AppState};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> Router {
    router(Arc::new(AppState::new(ApiConfig::default())))
}

fn complete_document() -> Value {
    json!({
        "type": "certification",
        "jurisdiction": "nj",
        "caseInfo": {
            "caption": "Smith v. Jones",
            "caseNumber": "MID-L-001234-24",
            "court": "SUPERIOR COURT OF NEW JERSEY"
        },
        "declarant": { "name": "Jane Doe" },
        "paragraphs": [
            {
                "content": "I am the plaintiff in this matter. See [lease].",
                "exhibitReferences": ["lease"]
            },
            { "content": "The defendant has not paid rent since March." }
        ],
        "exhibits": [
            { "id": "lease", "description": "Residential lease", "type": "document" }
        ],
        "signatureBlock": {
            "declarantName": "Jane Doe",
            "date": "2025-01-05",
            "location": "New Brunswick, NJ"
        }
    })
}

async fn post(app: Router, uri: &str, body: &Value) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, bytes.to_vec())
}

async fn post_json(uri: &str, body: &Value) -> (StatusCode, Value) {
    let (status, bytes) = post(app(), uri, body).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_is_ok() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn preview_returns_tree_with_placeholders() {
    let body = json!({ "type": "affidavit", "jurisdiction": "federal" });
    let (status, tree) = post_json("/api/documents/preview", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(tree["blocks"][0]["kind"], "court_header");
    assert_eq!(tree["blocks"][0]["court"], "UNITED STATES DISTRICT COURT");
    assert!(tree.to_string().contains("[Case Caption]"));
}

#[tokio::test]
async fn validate_lists_every_problem() {
    let body = json!({ "type": "affidavit", "jurisdiction": "nj" });
    let (status, verdict) = post_json("/api/documents/validate", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["valid"], false);
    assert_eq!(verdict["errors"].as_array().unwrap().len(), 7);
    assert_eq!(verdict["errors"][0]["field"], "caseInfo.caption");

    let (_, verdict) = post_json("/api/documents/validate", &complete_document()).await;
    assert_eq!(verdict["valid"], true);
}

#[tokio::test]
async fn finalize_moves_draft_to_final() {
    let (status, body) = post_json("/api/documents/finalize", &complete_document()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["document"]["status"], "final");
    let text = body["tree"].to_string();
    assert!(text.contains("See (Ex. A)."));
    assert!(!text.contains("[Date]"));
}

#[tokio::test]
async fn finalize_incomplete_draft_is_unprocessable() {
    let mut doc = complete_document();
    doc["caseInfo"]["caption"] = json!("");
    let (status, body) = post_json("/api/documents/finalize", &doc).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], 422);
    assert_eq!(body["errors"][0]["field"], "caseInfo.caption");
}

#[tokio::test]
async fn filing_a_draft_conflicts() {
    let (status, body) = post_json("/api/documents/file", &complete_document()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], 409);
}

#[tokio::test]
async fn reopen_final_document() {
    let mut doc = complete_document();
    doc["status"] = json!("final");
    let (status, body) = post_json("/api/documents/reopen", &doc).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "draft");
}

#[tokio::test]
async fn malformed_payload_is_bad_request() {
    let (status, bytes) = post(
        app(),
        "/api/documents/preview",
        &json!({ "jurisdiction": "mars" }),
    )
    .await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], 400);
}

#[tokio::test]
async fn render_text_sets_download_headers() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/documents/render/txt?final=true")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(complete_document().to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers[header::CONTENT_TYPE], "text/plain; charset=utf-8");
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"MID_L_001234_24_certification.txt\""
    );
    assert!(headers.contains_key("x-page-count"));

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("SUPERIOR COURT OF NEW JERSEY"));
    assert!(text.contains("CERTIFICATION OF JANE DOE"));
}

#[tokio::test]
async fn render_unknown_format_is_bad_request() {
    let (status, _) = post(app(), "/api/documents/render/rtf", &complete_document()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn render_artifact_is_base64_json() {
    let body = json!({ "document": complete_document(), "format": "html" });
    let (status, artifact) = post_json("/api/documents/render", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(artifact["mime_type"], "text/html; charset=utf-8");
    assert_eq!(artifact["filename"], "MID_L_001234_24_certification.html");
    assert!(!artifact["data_base64"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn render_docx_is_a_zip_package() {
    let (status, bytes) = post(app(), "/api/documents/render/docx", &complete_document()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bytes.starts_with(b"PK"));
}

#[tokio::test]
async fn final_render_of_incomplete_draft_is_unprocessable() {
    let body = json!({ "type": "affidavit", "jurisdiction": "nj" });
    let (status, _) = post(app(), "/api/documents/render/html?final=true", &body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn claimed_final_status_does_not_skip_validation() {
    let incomplete = json!({ "type": "affidavit", "jurisdiction": "federal", "status": "final" });

    let (status, bytes) = post(app(), "/api/documents/render/pdf?final=true", &incomplete).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"].as_array().unwrap().len(), 7);

    let (status, _) = post(app(), "/api/documents/file", &incomplete).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn duplicate_exhibit_ids_are_bad_request() {
    let mut doc = complete_document();
    doc["exhibits"] = json!([
        { "id": "lease", "description": "Residential lease" },
        { "id": "lease", "description": "Renewal" }
    ]);
    let (status, _) = post(app(), "/api/documents/preview", &doc).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn oversized_payload_is_rejected() {
    let app = router(Arc::new(AppState::new(ApiConfig {
        max_payload_bytes: 64,
        ..ApiConfig::default()
    })));
    let (status, _) = post(app, "/api/documents/preview", &complete_document()).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn instantiate_template_fills_name() {
    let body = json!({
        "template": {
            "id": "tenant-nonpayment",
            "name": "Tenant non-payment",
            "type": "certification",
            "jurisdiction": "nj",
            "content": {
                "paragraphs": ["I, [NAME], am the landlord.", "Rent is due on the first."]
            }
        },
        "caseInfo": { "caption": "Doe v. Roe", "caseNumber": "MID-LT-1-24" },
        "declarant": { "name": "Jane Doe" }
    });
    let (status, doc) = post_json("/api/templates/instantiate", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["status"], "draft");
    assert_eq!(doc["caseInfo"]["court"], "SUPERIOR COURT OF NEW JERSEY");
    assert_eq!(doc["paragraphs"][0]["content"], "I, Jane Doe, am the landlord.");
    assert_eq!(doc["paragraphs"][1]["number"], 2);
}
