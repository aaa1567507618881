//! HTTP handlers for the Declaration API
//!
//! Every endpoint is stateless: the client sends the full LegalDocument and
//! gets back a tree, a verdict, an updated document or rendered bytes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderName},
    response::{IntoResponse, Response},
    Json,
};
use declaration_types::{DocumentStatus, LegalDocument};
use render_engine::{render_document, RenderArtifact, RenderFormat, RenderedDocument};
use std::sync::Arc;

use assembly_engine::{collect_violations, DocumentTree};

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

const PAGE_COUNT_HEADER: HeaderName = HeaderName::from_static("x-page-count");

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Supported output formats
pub async fn formats() -> Json<Vec<FormatInfo>> {
    Json(RenderFormat::ALL.into_iter().map(FormatInfo::from).collect())
}

/// Live preview tree; gaps are filled with placeholders
pub async fn preview(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Json<DocumentTree>, ApiError> {
    let Json(document) = payload?;
    Ok(Json(state.engine.preview(&document)))
}

/// Finalization check; always 200, the verdict is in the body
pub async fn validate(
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let Json(document) = payload?;
    let errors = collect_violations(&document);
    Ok(Json(ValidateResponse {
        valid: errors.is_empty(),
        errors,
    }))
}

/// draft -> final, returning the updated document and its final tree
pub async fn finalize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Json<FinalizeResponse>, ApiError> {
    let Json(mut document) = payload?;
    let tree = state.engine.finalize(&mut document)?;
    Ok(Json(FinalizeResponse { document, tree }))
}

/// final -> filed
pub async fn mark_filed(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Json<LegalDocument>, ApiError> {
    let Json(mut document) = payload?;
    state.engine.mark_filed(&mut document)?;
    Ok(Json(document))
}

/// final -> draft
pub async fn reopen(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Json<LegalDocument>, ApiError> {
    let Json(mut document) = payload?;
    state.engine.reopen(&mut document)?;
    Ok(Json(document))
}

/// Rendered bytes with download headers
pub async fn render_raw(
    State(state): State<Arc<AppState>>,
    Path(format): Path<String>,
    Query(query): Query<RenderQuery>,
    payload: Result<Json<LegalDocument>, JsonRejection>,
) -> Result<Response, ApiError> {
    let format: RenderFormat = format.parse().map_err(ApiError::InvalidRequest)?;
    let Json(document) = payload?;
    let rendered = render(&state, document, format, query.final_copy).await?;

    let headers = [
        (header::CONTENT_TYPE, rendered.content_type),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", rendered.filename),
        ),
        (PAGE_COUNT_HEADER, rendered.page_count.to_string()),
    ];
    Ok((headers, rendered.bytes).into_response())
}

/// Rendered output as base64 inside JSON
pub async fn render_artifact(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Json<RenderArtifact>, ApiError> {
    let Json(req) = payload?;
    let rendered = render(&state, req.document, req.format, req.final_copy).await?;
    Ok(Json(rendered.to_artifact()))
}

/// Fresh draft from a template
pub async fn instantiate_template(
    payload: Result<Json<InstantiateRequest>, JsonRejection>,
) -> Result<Json<LegalDocument>, ApiError> {
    let Json(req) = payload?;
    let document = req.template.instantiate(req.case_info, req.declarant)?;
    tracing::info!(
        template = %req.template.id,
        document_id = %document.id,
        "Instantiated template"
    );
    Ok(Json(document))
}

async fn render(
    state: &AppState,
    document: LegalDocument,
    format: RenderFormat,
    final_copy: bool,
) -> Result<RenderedDocument, ApiError> {
    let tree = tree_for(state, document, final_copy)?;
    Ok(render_document(&tree, format, state.config.render_timeout_ms).await?)
}

/// Preview tree, or the final tree when asked for the final copy
///
/// A draft is finalized on a scratch copy so validation still applies.
fn tree_for(
    state: &AppState,
    mut document: LegalDocument,
    final_copy: bool,
) -> Result<DocumentTree, ApiError> {
    if !final_copy {
        return Ok(state.engine.preview(&document));
    }
    match document.status() {
        DocumentStatus::Draft => Ok(state.engine.finalize(&mut document)?),
        _ => Ok(state.engine.final_tree(&document)?),
    }
}
