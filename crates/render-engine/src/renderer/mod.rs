//! Renderers: one concrete surface per format
//!
//! A renderer walks the tree's blocks in order and must not alter their text.
//! Pagination is the renderer's business; the tree carries no page breaks.

pub mod docx;
pub mod html;
pub mod text;
pub mod typeset;

use base64::Engine;
use serde::{Deserialize, Serialize};

use assembly_engine::DocumentTree;

use crate::compiler::{RenderError, RenderFormat};

pub use self::docx::DocxRenderer;
pub use self::html::HtmlRenderer;
pub use self::text::TextRenderer;
pub use self::typeset::TypstRenderer;

/// Bytes of one rendered surface plus download metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
    pub page_count: usize,
}

impl RenderedDocument {
    pub fn new(
        bytes: Vec<u8>,
        tree: &DocumentTree,
        format: RenderFormat,
        page_count: usize,
    ) -> Self {
        Self {
            bytes,
            content_type: format.mime_type().to_string(),
            filename: suggested_filename(tree, format),
            page_count,
        }
    }

    /// JSON-friendly form with base64 data
    pub fn to_artifact(&self) -> RenderArtifact {
        RenderArtifact {
            data_base64: base64::engine::general_purpose::STANDARD.encode(&self.bytes),
            mime_type: self.content_type.clone(),
            filename: self.filename.clone(),
            page_count: self.page_count,
        }
    }
}

/// Rendered output with base64-encoded data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderArtifact {
    pub data_base64: String,
    pub mime_type: String,
    pub filename: String,
    pub page_count: usize,
}

pub trait Renderer {
    fn format(&self) -> RenderFormat;

    fn render(&self, tree: &DocumentTree) -> Result<RenderedDocument, RenderError>;
}

/// Renderer for a format, running on the current thread
pub fn renderer_for(format: RenderFormat) -> Box<dyn Renderer + Send + Sync> {
    match format {
        RenderFormat::Html => Box::new(HtmlRenderer::new()),
        RenderFormat::Docx => Box::new(DocxRenderer::new()),
        RenderFormat::Text => Box::new(TextRenderer::new()),
        RenderFormat::Pdf | RenderFormat::Svg => Box::new(TypstRenderer::new(format)),
    }
}

/// Render in any format; typeset formats compile off-thread under a timeout
#[cfg(feature = "server")]
pub async fn render_document(
    tree: &DocumentTree,
    format: RenderFormat,
    timeout_ms: u64,
) -> Result<RenderedDocument, RenderError> {
    let rendered = if format.is_typeset() {
        TypstRenderer::new(format).render_async(tree, timeout_ms).await
    } else {
        renderer_for(format).render(tree)
    };

    match &rendered {
        Ok(doc) => tracing::info!(
            %format,
            bytes = doc.bytes.len(),
            pages = doc.page_count,
            "Rendered document"
        ),
        Err(err) => tracing::error!(%format, error = %err, "Rendering failed"),
    }
    rendered
}

/// "{case number}_{type}.{ext}", with every non-alphanumeric character of the
/// case number replaced by `_`
pub fn suggested_filename(tree: &DocumentTree, format: RenderFormat) -> String {
    let case: String = tree
        .case_number
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let case = if case.is_empty() {
        "draft".to_string()
    } else {
        case
    };
    format!(
        "{}_{}.{}",
        case,
        tree.document_type.slug(),
        format.extension()
    )
}
