//! PDF and SVG page preview through the Typst layout

use assembly_engine::DocumentTree;

use super::{RenderedDocument, Renderer};
use crate::compiler::{self, RenderError, RenderFormat};

pub struct TypstRenderer {
    format: RenderFormat,
}

impl TypstRenderer {
    /// `format` should be PDF or SVG; other formats fail at render time
    pub fn new(format: RenderFormat) -> Self {
        Self { format }
    }

    #[cfg(feature = "server")]
    pub async fn render_async(
        &self,
        tree: &DocumentTree,
        timeout_ms: u64,
    ) -> Result<RenderedDocument, RenderError> {
        let compiled = compiler::compile_tree(tree, self.format, timeout_ms).await?;
        log_warnings(&compiled.warnings);
        Ok(RenderedDocument::new(
            compiled.bytes,
            tree,
            self.format,
            compiled.page_count,
        ))
    }
}

impl Renderer for TypstRenderer {
    fn format(&self) -> RenderFormat {
        self.format
    }

    fn render(&self, tree: &DocumentTree) -> Result<RenderedDocument, RenderError> {
        let compiled = compiler::compile_tree_sync(tree, self.format)?;
        log_warnings(&compiled.warnings);
        Ok(RenderedDocument::new(
            compiled.bytes,
            tree,
            self.format,
            compiled.page_count,
        ))
    }
}

fn log_warnings(warnings: &[compiler::CompileError]) {
    for warning in warnings {
        tracing::warn!(message = %warning.message, "Typst warning");
    }
}
