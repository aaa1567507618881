//! Typst compilation of a document tree
//!
//! The tree is handed to the layout as `sys.inputs.document`, so paragraph
//! text reaches Typst as string values and is never parsed as markup.

use std::collections::HashMap;
#[cfg(feature = "server")]
use std::time::Duration;

use assembly_engine::DocumentTree;
use typst::diag::{Severity, SourceDiagnostic, SourceResult, Warned};
use typst::model::Document;

use super::errors::{CompileError, RenderError};
use super::output::RenderFormat;
use crate::world::VirtualWorld;

const LAYOUT_PATH: &str = "/layout.typ";

/// Court-paper layout, embedded at build time
pub const LAYOUT_SOURCE: &str = include_str!("../../templates/declaration.typ");

const MAIN_SOURCE: &str = "#import \"/layout.typ\": declaration\n\
                           #declaration(sys.inputs.document)\n";

/// Output of one successful compilation
#[derive(Debug, Clone)]
pub struct CompiledDocument {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub warnings: Vec<CompileError>,
}

/// Compile a tree on the current thread
pub fn compile_tree_sync(
    tree: &DocumentTree,
    format: RenderFormat,
) -> Result<CompiledDocument, RenderError> {
    ensure_typeset(format)?;
    let world = build_world(tree)?;
    finish(typst::compile(&world), format)
}

/// Compile a tree on the blocking pool, giving up after `timeout_ms`
#[cfg(feature = "server")]
pub async fn compile_tree(
    tree: &DocumentTree,
    format: RenderFormat,
    timeout_ms: u64,
) -> Result<CompiledDocument, RenderError> {
    ensure_typeset(format)?;
    let world = build_world(tree)?;

    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        tokio::task::spawn_blocking(move || finish(typst::compile(&world), format)),
    )
    .await;

    match result {
        Ok(Ok(compiled)) => compiled,
        Ok(Err(join_error)) => Err(RenderError::RenderingFailed(format!(
            "Compilation task panicked: {}",
            join_error
        ))),
        Err(_elapsed) => {
            tracing::error!(timeout_ms, "Typst compilation timed out");
            Err(RenderError::Timeout(timeout_ms))
        }
    }
}

/// Parse errors in the embedded layout; empty when it is well formed
pub fn validate_layout() -> Vec<CompileError> {
    typst::syntax::parse(LAYOUT_SOURCE)
        .errors()
        .into_iter()
        .map(|error| CompileError::new(error.message.to_string()))
        .collect()
}

fn ensure_typeset(format: RenderFormat) -> Result<(), RenderError> {
    if format.is_typeset() {
        Ok(())
    } else {
        Err(RenderError::UnsupportedFormat(format!(
            "{} is not produced by the Typst layout",
            format
        )))
    }
}

fn build_world(tree: &DocumentTree) -> Result<VirtualWorld, RenderError> {
    let mut inputs = HashMap::new();
    inputs.insert("document".to_string(), serde_json::to_value(tree)?);
    VirtualWorld::new(
        MAIN_SOURCE.to_string(),
        &[(LAYOUT_PATH, LAYOUT_SOURCE)],
        inputs,
    )
}

fn finish(
    warned: Warned<SourceResult<Document>>,
    format: RenderFormat,
) -> Result<CompiledDocument, RenderError> {
    let (_, warnings) = categorize_diagnostics(&warned.warnings);

    let document = warned.output.map_err(|diagnostics| {
        let (errors, _) = categorize_diagnostics(&diagnostics);
        tracing::error!(errors = errors.len(), "Typst compilation failed");
        RenderError::Compile(errors)
    })?;

    let bytes = export_document(&document, format)?;
    Ok(CompiledDocument {
        bytes,
        page_count: document.pages.len(),
        warnings,
    })
}

fn export_document(document: &Document, format: RenderFormat) -> Result<Vec<u8>, RenderError> {
    match format {
        RenderFormat::Pdf => typst_pdf::pdf(document, &typst_pdf::PdfOptions::default())
            .map_err(|diagnostics| {
                let (errors, _) = categorize_diagnostics(&diagnostics);
                RenderError::Compile(errors)
            }),
        RenderFormat::Svg => document
            .pages
            .first()
            .map(|page| typst_svg::svg(page).into_bytes())
            .ok_or_else(|| RenderError::RenderingFailed("Document has no pages".to_string())),
        RenderFormat::Html | RenderFormat::Docx | RenderFormat::Text => {
            Err(RenderError::UnsupportedFormat(format.to_string()))
        }
    }
}

/// Split diagnostics into errors and warnings
fn categorize_diagnostics(
    diagnostics: &[SourceDiagnostic],
) -> (Vec<CompileError>, Vec<CompileError>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let mut compile_error = CompileError::new(diag.message.to_string());
        if !diag.hints.is_empty() {
            let hint = diag
                .hints
                .iter()
                .map(|h| h.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            compile_error = compile_error.with_hint(hint);
        }

        match diag.severity {
            Severity::Error => errors.push(compile_error),
            Severity::Warning => warnings.push(compile_error.as_warning()),
        }
    }

    (errors, warnings)
}
